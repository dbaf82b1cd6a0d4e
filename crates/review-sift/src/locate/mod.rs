//! Locators: resolve a free-text movie title to a source URL.

pub mod find_page;
pub mod search_query;
pub mod suggestion;

use crate::error::SiftResult;
use async_trait::async_trait;

pub use find_page::FindPageLocator;
pub use search_query::SearchQueryLocator;
pub use suggestion::SuggestionLocator;

/// Resolves a title to the URL an extractor should fetch.
#[async_trait]
pub trait Locator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the source has no match for the title.
    async fn locate(&self, title: &str) -> SiftResult<Option<String>>;
}
