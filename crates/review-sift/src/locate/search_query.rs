//! Search-engine query construction. No network I/O.

use super::Locator;
use crate::error::SiftResult;
use async_trait::async_trait;

/// Words appended to the title so results skew toward reviews.
pub const QUERY_SUFFIX: &str = "movie reviews";

pub struct SearchQueryLocator {
    search_base: String,
}

impl SearchQueryLocator {
    pub fn new(search_base: impl Into<String>) -> Self {
        Self {
            search_base: search_base.into(),
        }
    }

    pub fn query_url(&self, title: &str) -> SiftResult<String> {
        let q = format!("{} {QUERY_SUFFIX}", title.trim());
        let url = url::Url::parse_with_params(&format!("{}/", self.search_base), &[("q", q)])?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl Locator for SearchQueryLocator {
    fn name(&self) -> &'static str {
        "search-query"
    }

    async fn locate(&self, title: &str) -> SiftResult<Option<String>> {
        self.query_url(title).map(Some)
    }
}
