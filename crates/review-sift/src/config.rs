//! Configuration loading and resolution.
//!
//! Every setting resolves as: explicit CLI value > `REVIEW_SIFT_*`
//! environment variable > built-in default.

use crate::error::{SiftError, SiftResult};
use crate::types::Thresholds;
use std::path::PathBuf;

pub const DEFAULT_IMDB_BASE: &str = "https://www.imdb.com";
pub const DEFAULT_SUGGEST_BASE: &str = "https://v3.sg.media-imdb.com";
pub const DEFAULT_SEARCH_BASE: &str = "https://html.duckduckgo.com/html";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Browser-identifying User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/91.0.4472.124 Safari/537.36";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Movie database site root, without trailing slash.
    pub imdb_base: String,
    /// Title suggestion service root.
    pub suggest_base: String,
    /// Search engine endpoint; the query is appended as `?q=`.
    pub search_base: String,
    pub user_agent: String,
    pub timeout_ms: u64,
    /// Explicit Chromium binary; discovered at launch when unset.
    pub chromium_path: Option<PathBuf>,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            imdb_base: DEFAULT_IMDB_BASE.to_string(),
            suggest_base: DEFAULT_SUGGEST_BASE.to_string(),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            chromium_path: None,
            thresholds: Thresholds::default(),
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub timeout_ms: Option<u64>,
    pub limit: Option<usize>,
    pub chromium_path: Option<String>,
}

impl Config {
    /// Resolve from CLI overrides and the process environment.
    pub fn resolve(overrides: &Overrides) -> SiftResult<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve using an arbitrary environment lookup.
    pub fn resolve_with<F>(overrides: &Overrides, env: F) -> SiftResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = env("REVIEW_SIFT_IMDB_BASE") {
            config.imdb_base = v;
        }
        if let Some(v) = env("REVIEW_SIFT_SUGGEST_BASE") {
            config.suggest_base = v;
        }
        if let Some(v) = env("REVIEW_SIFT_SEARCH_BASE") {
            config.search_base = v;
        }
        if let Some(v) = env("REVIEW_SIFT_USER_AGENT") {
            config.user_agent = v;
        }
        if let Some(v) = env("REVIEW_SIFT_TIMEOUT_MS") {
            config.timeout_ms = v.trim().parse().map_err(|_| {
                SiftError::Config(format!("REVIEW_SIFT_TIMEOUT_MS is not a number: '{v}'"))
            })?;
        }
        if let Some(v) = env("REVIEW_SIFT_CHROMIUM_PATH") {
            config.chromium_path = Some(PathBuf::from(v));
        }

        if let Some(t) = overrides.timeout_ms {
            config.timeout_ms = t;
        }
        if let Some(limit) = overrides.limit {
            config.thresholds.limit = limit;
        }
        if let Some(p) = &overrides.chromium_path {
            config.chromium_path = Some(PathBuf::from(p));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check base URLs parse and strip trailing slashes.
    pub fn validate(&mut self) -> SiftResult<()> {
        for (name, value) in [
            ("imdb_base", &mut self.imdb_base),
            ("suggest_base", &mut self.suggest_base),
            ("search_base", &mut self.search_base),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| SiftError::Config(format!("{name} '{value}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SiftError::Config(format!(
                    "{name} must be http or https, got '{}'",
                    parsed.scheme()
                )));
            }
            while value.ends_with('/') {
                value.pop();
            }
        }
        if self.timeout_ms == 0 {
            return Err(SiftError::Config("timeout must be greater than 0".into()));
        }
        Ok(())
    }

    /// Config whose three base URLs all point at one local server.
    pub fn for_base(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            imdb_base: base.clone(),
            suggest_base: base.clone(),
            search_base: format!("{base}/html"),
            timeout_ms: 5_000,
            ..Self::default()
        }
    }
}
