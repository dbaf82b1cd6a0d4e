//! Search-engine result snippets as review records.

use super::reviews::stripped_text;
use super::Extractor;
use crate::acquisition::HttpClient;
use crate::error::SiftResult;
use crate::types::ReviewRecord;
use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static RESULT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.result").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__a").unwrap());
static SNIPPET_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".result__snippet").unwrap());

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*/\s*10\b").expect("score regex is valid"));

/// Pull an "N/10" score out of free text.
pub fn score_out_of_ten(text: &str) -> Option<f64> {
    SCORE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse search results into records, skipping results with no text.
pub fn parse_snippets(html: &str) -> Vec<ReviewRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for result in document.select(&RESULT_SELECTOR) {
        let snippet = result
            .select(&SNIPPET_SELECTOR)
            .next()
            .map(|el| stripped_text(&el))
            .unwrap_or_default();
        let title = result
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| stripped_text(&el))
            .unwrap_or_default();

        let review_text = if snippet.is_empty() { title } else { snippet };
        if review_text.is_empty() {
            continue;
        }
        let rating = score_out_of_ten(&review_text);
        records.push(ReviewRecord {
            review_text,
            rating,
        });
    }

    records
}

/// Fetches a search results page and keeps its snippets.
pub struct SnippetExtractor {
    client: HttpClient,
}

impl SnippetExtractor {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for SnippetExtractor {
    fn name(&self) -> &'static str {
        "search-snippets"
    }

    async fn extract(&self, url: &str) -> SiftResult<Vec<ReviewRecord>> {
        let resp = self.client.get(url).await?;
        Ok(parse_snippets(&resp.body))
    }
}
