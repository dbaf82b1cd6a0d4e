//! Error types shared by the locators, extractors and renderer.

/// Everything that can go wrong while locating or scraping a review source.
///
/// The pipeline treats every variant the same way (a user-facing message and
/// an empty result); the variants exist so that logs and tests can tell a
/// dead network apart from a page whose markup no longer matches.
#[derive(thiserror::Error, Debug)]
pub enum SiftError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("unexpected markup: {0}")]
    Markup(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("timed out after {0}ms")]
    Timeout(u64),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SiftError {
    /// Short category name used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SiftError::Transport(_) | SiftError::Status { .. } | SiftError::Timeout(_) => {
                "network"
            }
            SiftError::Markup(_) | SiftError::Json(_) => "markup",
            SiftError::Browser(_) => "browser",
            SiftError::Config(_) | SiftError::Url(_) => "config",
        }
    }
}

/// Convenience result type.
pub type SiftResult<T> = Result<T, SiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_url() {
        let err = SiftError::Status {
            status: 503,
            url: "https://www.imdb.com/find?q=x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "https://www.imdb.com/find?q=x returned HTTP 503"
        );
        assert_eq!(err.kind(), "network");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(SiftError::Markup("x".into()).kind(), "markup");
        assert_eq!(SiftError::Browser("x".into()).kind(), "browser");
        assert_eq!(SiftError::Timeout(10).kind(), "network");
        assert_eq!(SiftError::Config("x".into()).kind(), "config");
    }
}
