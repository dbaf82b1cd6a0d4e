// Copyright 2026 review-sift Contributors
// SPDX-License-Identifier: Apache-2.0

//! One search run: locate, extract, classify and present.
//!
//! Every stage failure is reported on the surface and resolved to an empty
//! result. Nothing here returns an error to the caller.

use crate::classify::classify;
use crate::present::{present, present_snippets, Surface};
use crate::source::{Pipeline, Presentation};
use crate::types::{Classified, ReviewRecord, Thresholds};
use serde::Serialize;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The title was blank; nothing ran.
    EmptyTitle,
    /// The locator found nothing (or failed); the extractor never ran.
    NotFound,
    /// The extractor produced zero records.
    NoReviews,
    /// Records were extracted and presented.
    Presented,
}

/// Everything a run produced, for JSON output and tests.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub title: String,
    pub source: crate::source::Source,
    pub url: Option<String>,
    pub status: RunStatus,
    pub records: Vec<ReviewRecord>,
    pub classified: Option<Classified>,
}

/// Execute one run against `surface`.
pub async fn run(
    title: &str,
    pipeline: &Pipeline,
    thresholds: &Thresholds,
    surface: &mut dyn Surface,
) -> RunOutcome {
    let title = title.trim();
    let mut outcome = RunOutcome {
        title: title.to_string(),
        source: pipeline.source,
        url: None,
        status: RunStatus::EmptyTitle,
        records: Vec::new(),
        classified: None,
    };

    if title.is_empty() {
        surface.warning("Please enter a movie title.");
        return outcome;
    }

    tracing::info!(title, source = %pipeline.source, "run started");

    surface.stage_started("Searching for the movie...");
    let located = pipeline.locator.locate(title).await;
    surface.stage_finished();

    let url = match located {
        Ok(Some(url)) => url,
        Ok(None) => {
            tracing::info!(title, locator = pipeline.locator.name(), "no match");
            surface.error(&format!("Could not find a movie with the title: '{title}'"));
            outcome.status = RunStatus::NotFound;
            return outcome;
        }
        Err(e) => {
            tracing::warn!(
                locator = pipeline.locator.name(),
                kind = e.kind(),
                "locate failed: {e}"
            );
            surface.error(&format!("Error searching for movie: {e}"));
            surface.error(&format!("Could not find a movie with the title: '{title}'"));
            outcome.status = RunStatus::NotFound;
            return outcome;
        }
    };

    let display_url = url.split('?').next().unwrap_or(&url).to_string();
    tracing::info!(url = %display_url, "located");
    surface.success(&format!("Found movie page: {display_url}"));
    outcome.url = Some(url.clone());

    surface.stage_started("Scraping reviews... this may take a moment.");
    let records = crate::extract::extract_or_empty(pipeline.extractor.as_ref(), &url, surface).await;
    surface.stage_finished();

    if records.is_empty() {
        surface.error(
            "Could not scrape reviews. The page structure may have changed, \
             or there might be no reviews available.",
        );
        outcome.status = RunStatus::NoReviews;
    } else {
        outcome.status = RunStatus::Presented;
    }

    match pipeline.presentation {
        Presentation::Classified => {
            let classified = classify(&records, thresholds);
            tracing::debug!(
                positive = classified.positive.len(),
                negative = classified.negative.len(),
                "classified"
            );
            present(&classified, thresholds.limit, surface);
            outcome.classified = Some(classified);
        }
        Presentation::Snippets => {
            if !records.is_empty() {
                present_snippets(&records, thresholds.limit, surface);
            }
        }
    }

    outcome.records = records;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SiftError, SiftResult};
    use crate::extract::Extractor;
    use crate::locate::Locator;
    use crate::present::{MemorySurface, SurfaceLine, NEGATIVE_HEADER, POSITIVE_HEADER};
    use crate::source::Source;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubLocator(SiftResult<Option<String>>);

    #[async_trait]
    impl Locator for StubLocator {
        fn name(&self) -> &'static str {
            "stub"
        }
        async fn locate(&self, _title: &str) -> SiftResult<Option<String>> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(SiftError::Markup(e.to_string())),
            }
        }
    }

    struct CountingExtractor {
        calls: Arc<AtomicUsize>,
        records: Vec<ReviewRecord>,
    }

    #[async_trait]
    impl Extractor for CountingExtractor {
        fn name(&self) -> &'static str {
            "counting"
        }
        async fn extract(&self, _url: &str) -> SiftResult<Vec<ReviewRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.clone())
        }
    }

    fn pipeline(
        located: SiftResult<Option<String>>,
        records: Vec<ReviewRecord>,
        presentation: Presentation,
    ) -> (Pipeline, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = Pipeline {
            source: Source::Imdb,
            locator: Box::new(StubLocator(located)),
            extractor: Box::new(CountingExtractor {
                calls: Arc::clone(&calls),
                records,
            }),
            presentation,
        };
        (p, calls)
    }

    #[tokio::test]
    async fn test_full_run() {
        let (p, _) = pipeline(
            Ok(Some("https://www.imdb.com/title/tt0468569/?ref_=fn".into())),
            vec![
                ReviewRecord::new("great", Some(9.0)),
                ReviewRecord::new("ok", Some(5.0)),
                ReviewRecord::new("bad", Some(2.0)),
            ],
            Presentation::Classified,
        );
        let mut surface = MemorySurface::new();
        let outcome = run("The Dark Knight", &p, &Thresholds::default(), &mut surface).await;

        assert_eq!(outcome.status, RunStatus::Presented);
        assert!(surface.lines.contains(&SurfaceLine::Success(
            "Found movie page: https://www.imdb.com/title/tt0468569/".into()
        )));
        assert_eq!(surface.section(POSITIVE_HEADER), vec!["1. great"]);
        assert_eq!(surface.section(NEGATIVE_HEADER), vec!["1. bad"]);
    }

    #[tokio::test]
    async fn test_no_match_skips_extractor() {
        let (p, calls) = pipeline(Ok(None), vec![], Presentation::Classified);
        let mut surface = MemorySurface::new();
        let outcome = run("Nonexistent", &p, &Thresholds::default(), &mut surface).await;

        assert_eq!(outcome.status, RunStatus::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            surface.errors(),
            vec!["Could not find a movie with the title: 'Nonexistent'"]
        );
    }

    #[tokio::test]
    async fn test_locator_error_skips_extractor() {
        let (p, calls) = pipeline(
            Err(SiftError::Markup("boom".into())),
            vec![],
            Presentation::Classified,
        );
        let mut surface = MemorySurface::new();
        let outcome = run("Heat", &p, &Thresholds::default(), &mut surface).await;

        assert_eq!(outcome.status, RunStatus::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(surface.errors()[0].starts_with("Error searching for movie:"));
    }

    #[tokio::test]
    async fn test_empty_extraction_reports_both_lists() {
        let (p, calls) = pipeline(
            Ok(Some("https://www.imdb.com/title/tt1/".into())),
            vec![],
            Presentation::Classified,
        );
        let mut surface = MemorySurface::new();
        let outcome = run("Heat", &p, &Thresholds::default(), &mut surface).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.status, RunStatus::NoReviews);
        assert_eq!(
            surface.section(POSITIVE_HEADER),
            vec!["No positive reviews found."]
        );
        assert_eq!(
            surface.section(NEGATIVE_HEADER),
            vec!["No negative reviews found."]
        );
    }

    #[tokio::test]
    async fn test_blank_title() {
        let (p, calls) = pipeline(Ok(None), vec![], Presentation::Classified);
        let mut surface = MemorySurface::new();
        let outcome = run("   ", &p, &Thresholds::default(), &mut surface).await;

        assert_eq!(outcome.status, RunStatus::EmptyTitle);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            surface.lines,
            vec![SurfaceLine::Warning("Please enter a movie title.".into())]
        );
    }

    #[tokio::test]
    async fn test_snippet_presentation_ignores_thresholds() {
        let (p, _) = pipeline(
            Ok(Some("https://search.example/?q=x".into())),
            vec![
                ReviewRecord::new("mid", Some(5.0)),
                ReviewRecord::new("unrated", None),
            ],
            Presentation::Snippets,
        );
        let mut surface = MemorySurface::new();
        let outcome = run("x", &p, &Thresholds::default(), &mut surface).await;

        assert_eq!(outcome.status, RunStatus::Presented);
        assert!(outcome.classified.is_none());
        assert_eq!(surface.body(), vec!["1. mid", "2. unrated"]);
    }
}
