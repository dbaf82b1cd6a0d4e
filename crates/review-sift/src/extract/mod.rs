//! Extractors: fetch a located page and parse it into review records.
//!
//! Every extractor reports failures as `Err`; [`extract_or_empty`] is the
//! stage boundary that turns any failure into an empty result plus a
//! user-visible message.

pub mod browser;
pub mod reviews;
pub mod snippets;

use crate::error::SiftResult;
use crate::present::Surface;
use crate::types::ReviewRecord;
use async_trait::async_trait;

pub use browser::BrowserReviewExtractor;
pub use reviews::{parse_review_page, reviews_url, HttpReviewExtractor};
pub use snippets::{parse_snippets, SnippetExtractor};

/// Fetches a page and parses review records out of it.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn extract(&self, url: &str) -> SiftResult<Vec<ReviewRecord>>;
}

/// Run an extractor, reporting any failure and yielding no records.
pub async fn extract_or_empty(
    extractor: &dyn Extractor,
    url: &str,
    surface: &mut dyn Surface,
) -> Vec<ReviewRecord> {
    match extractor.extract(url).await {
        Ok(records) => {
            tracing::info!(
                extractor = extractor.name(),
                count = records.len(),
                "extracted reviews"
            );
            records
        }
        Err(e) => {
            tracing::warn!(
                extractor = extractor.name(),
                kind = e.kind(),
                "extraction failed: {e}"
            );
            surface.error(&format!("Error scraping reviews: {e}"));
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiftError;
    use crate::present::MemorySurface;

    struct Failing;

    #[async_trait]
    impl Extractor for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn extract(&self, _url: &str) -> SiftResult<Vec<ReviewRecord>> {
            Err(SiftError::Markup("no review containers".into()))
        }
    }

    struct Fixed(Vec<ReviewRecord>);

    #[async_trait]
    impl Extractor for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        async fn extract(&self, _url: &str) -> SiftResult<Vec<ReviewRecord>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_failure_becomes_empty_with_message() {
        let mut surface = MemorySurface::new();
        let records = extract_or_empty(&Failing, "https://x/", &mut surface).await;
        assert!(records.is_empty());
        assert_eq!(
            surface.errors(),
            vec!["Error scraping reviews: unexpected markup: no review containers"]
        );
    }

    #[tokio::test]
    async fn test_success_passes_records_through() {
        let mut surface = MemorySurface::new();
        let fixed = Fixed(vec![ReviewRecord::new("fine", Some(6.0))]);
        let records = extract_or_empty(&fixed, "https://x/", &mut surface).await;
        assert_eq!(records.len(), 1);
        assert!(surface.lines.is_empty());
    }
}
