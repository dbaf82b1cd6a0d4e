//! User-review pages on the movie database site.
//!
//! The selectors below match one specific page layout. They are literals on
//! purpose: the markup is an unversioned external format and any redesign
//! breaks them.

use super::Extractor;
use crate::acquisition::HttpClient;
use crate::error::SiftResult;
use crate::types::{ReviewRecord, MISSING_TEXT};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Container for a single user review.
pub const REVIEW_CONTAINER: &str = "div.review-container";

static CONTAINER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(REVIEW_CONTAINER).unwrap());
static TEXT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.text").unwrap());
static RATING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.rating-other-user-rating").unwrap());
static SPAN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

/// Reviews page for a title URL: query string dropped, `reviews` appended.
pub fn reviews_url(movie_url: &str) -> String {
    let base = movie_url.split('?').next().unwrap_or(movie_url);
    format!("{base}reviews")
}

/// Parse every review container on the page.
///
/// A container without a text element gets the `"N/A"` placeholder; a
/// missing or non-numeric rating becomes `None`.
pub fn parse_review_page(html: &str) -> Vec<ReviewRecord> {
    let document = Html::parse_document(html);
    document
        .select(&CONTAINER_SELECTOR)
        .map(|container| {
            let review_text = container
                .select(&TEXT_SELECTOR)
                .next()
                .map(|el| stripped_text(&el))
                .unwrap_or_else(|| MISSING_TEXT.to_string());

            let rating = container
                .select(&RATING_SELECTOR)
                .next()
                .and_then(|el| el.select(&SPAN_SELECTOR).next())
                .and_then(|span| stripped_text(&span).parse::<f64>().ok());

            ReviewRecord {
                review_text,
                rating,
            }
        })
        .collect()
}

/// Text content with each fragment trimmed and joined by single spaces.
pub(crate) fn stripped_text(el: &ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fetches the reviews page over plain HTTP.
pub struct HttpReviewExtractor {
    client: HttpClient,
}

impl HttpReviewExtractor {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for HttpReviewExtractor {
    fn name(&self) -> &'static str {
        "http-reviews"
    }

    async fn extract(&self, url: &str) -> SiftResult<Vec<ReviewRecord>> {
        let target = reviews_url(url);
        let resp = self.client.get(&target).await?;
        Ok(parse_review_page(&resp.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html><body>
      <div class="lister-list">
        <div class="review-container">
          <div class="ipl-ratings-bar">
            <span class="rating-other-user-rating">
              <svg></svg>
              <span> 9 </span><span class="point-scale">/10</span>
            </span>
          </div>
          <a class="title"> A masterpiece</a>
          <div class="content">
            <div class="text show-more__control">
              Best superhero film ever made.<br/>
              The Joker steals every scene.
            </div>
          </div>
        </div>
        <div class="review-container">
          <div class="content"><div class="text">No score given here.</div></div>
        </div>
        <div class="review-container">
          <span class="rating-other-user-rating"><span>3</span></span>
        </div>
        <div class="review-container">
          <span class="rating-other-user-rating"><span>ten</span></span>
          <div class="text">Garbled score</div>
        </div>
      </div>
    </body></html>
    "#;

    #[test]
    fn test_parse_review_page() {
        let records = parse_review_page(PAGE);
        assert_eq!(records.len(), 4);

        assert_eq!(
            records[0].review_text,
            "Best superhero film ever made. The Joker steals every scene."
        );
        assert_eq!(records[0].rating, Some(9.0));

        assert_eq!(records[1].review_text, "No score given here.");
        assert_eq!(records[1].rating, None);

        assert_eq!(records[2].review_text, MISSING_TEXT);
        assert_eq!(records[2].rating, Some(3.0));

        assert_eq!(records[3].review_text, "Garbled score");
        assert_eq!(records[3].rating, None);
    }

    #[test]
    fn test_parse_page_without_containers() {
        let records = parse_review_page("<html><body><p>Sign in</p></body></html>");
        assert!(records.is_empty());
    }

    #[test]
    fn test_no_panic_on_malformed_html() {
        let records = parse_review_page("<div class='review-container'><div class='text'>open");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].review_text, "open");
    }

    #[test]
    fn test_reviews_url() {
        assert_eq!(
            reviews_url("https://www.imdb.com/title/tt0468569/?ref_=fn_al_tt_1"),
            "https://www.imdb.com/title/tt0468569/reviews"
        );
        assert_eq!(
            reviews_url("https://www.imdb.com/title/tt0468569/"),
            "https://www.imdb.com/title/tt0468569/reviews"
        );
    }
}
