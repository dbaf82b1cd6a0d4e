//! Environment readiness check.

use crate::acquisition::HttpClient;
use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::renderer::chromium::find_chromium;
use anyhow::Result;
use serde_json::json;

/// Check configuration, source reachability and Chromium availability.
pub async fn run(config: &Config) -> Result<()> {
    let chromium = find_chromium(config.chromium_path.as_ref());
    let client = HttpClient::from_config(config)?;

    let mut reach = Vec::new();
    for (name, base) in [
        ("imdb_base", &config.imdb_base),
        ("suggest_base", &config.suggest_base),
        ("search_base", &config.search_base),
    ] {
        let result = client.get(base).await;
        reach.push((name, base.as_str(), result.err().map(|e| e.to_string())));
    }

    if output::is_json() {
        output::print_json(&json!({
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "timeout_ms": config.timeout_ms,
            "chromium": chromium.as_ref().map(|p| p.display().to_string()),
            "endpoints": reach
                .iter()
                .map(|(name, base, err)| json!({ "name": name, "url": base, "error": err }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    let s = Styled::new();
    println!("review-sift doctor");
    println!("==================");
    println!();
    println!("OS:      {}", std::env::consts::OS);
    println!("Arch:    {}", std::env::consts::ARCH);
    println!("Timeout: {}ms", config.timeout_ms);
    println!();

    for (name, base, err) in &reach {
        match err {
            None => println!("{} {name}: {base} reachable", s.ok_sym()),
            Some(e) => println!("{} {name}: {base} ({e})", s.err_sym()),
        }
    }

    match &chromium {
        Some(path) => println!("{} Chromium found: {}", s.ok_sym(), path.display()),
        None => println!(
            "{} Chromium NOT found. The 'browser' source is unavailable; \
             set REVIEW_SIFT_CHROMIUM_PATH.",
            s.warn_sym()
        ),
    }

    println!();
    let http_ready = reach.iter().all(|(_, _, err)| err.is_none());
    println!(
        "Status: {}",
        if http_ready { "READY" } else { "DEGRADED" }
    );

    Ok(())
}
