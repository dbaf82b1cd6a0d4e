//! Title lookup by scraping the movie database's own search page.

use super::Locator;
use crate::acquisition::HttpClient;
use crate::error::SiftResult;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Search page URL for a title, form-encoded so spaces become `+`.
pub fn find_url(base: &str, title: &str) -> String {
    let query: String = url::form_urlencoded::byte_serialize(title.as_bytes()).collect();
    format!("{base}/find?q={query}")
}

/// `href` of the first link pointing at a title page.
pub fn first_title_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.contains("/title/tt"))
        .map(|href| href.to_string())
}

pub struct FindPageLocator {
    client: HttpClient,
    base: String,
}

impl FindPageLocator {
    pub fn new(client: HttpClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }
}

#[async_trait]
impl Locator for FindPageLocator {
    fn name(&self) -> &'static str {
        "find-page"
    }

    async fn locate(&self, title: &str) -> SiftResult<Option<String>> {
        let resp = self.client.get(&find_url(&self.base, title)).await?;
        match first_title_link(&resp.body) {
            Some(href) => {
                let resolved = url::Url::parse(&self.base)?.join(&href)?;
                Ok(Some(resolved.to_string()))
            }
            None => Ok(None),
        }
    }
}
