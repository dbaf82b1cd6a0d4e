//! `review-sift search <title>` — one run against one source.

use crate::cli::output::{self, JsonSurface, Message, TerminalSurface};
use crate::config::Config;
use crate::pipeline::{self, RunOutcome};
use crate::source::Source;
use anyhow::{Context, Result};
use serde_json::{json, Value};

/// Run the search command.
pub async fn run(title: &str, source: Source, config: &Config) -> Result<()> {
    let pipeline = source
        .build(config)
        .with_context(|| format!("failed to set up source '{source}'"))?;

    if output::is_json() {
        let mut surface = JsonSurface::default();
        let outcome = pipeline::run(title, &pipeline, &config.thresholds, &mut surface).await;
        output::print_json(&outcome_json(&outcome, &surface.messages, config.thresholds.limit));
    } else {
        let mut surface = TerminalSurface::new();
        pipeline::run(title, &pipeline, &config.thresholds, &mut surface).await;
    }

    Ok(())
}

/// JSON document for a finished run. Lists are truncated to `limit`.
pub fn outcome_json(outcome: &RunOutcome, messages: &[Message], limit: usize) -> Value {
    let texts = |records: &[crate::types::ReviewRecord]| -> Vec<Value> {
        records
            .iter()
            .take(limit)
            .map(|r| json!({ "review_text": r.review_text, "rating": r.rating }))
            .collect()
    };

    let (positive, negative, snippets) = match &outcome.classified {
        Some(c) => (
            texts(c.positive.as_slice()),
            texts(c.negative.as_slice()),
            Vec::new(),
        ),
        None => (Vec::new(), Vec::new(), texts(outcome.records.as_slice())),
    };

    json!({
        "title": outcome.title,
        "source": outcome.source,
        "url": outcome.url,
        "status": outcome.status,
        "record_count": outcome.records.len(),
        "positive": positive,
        "negative": negative,
        "snippets": snippets,
        "messages": messages,
    })
}
