//! Named pairings of a locator with an extractor.

use crate::acquisition::HttpClient;
use crate::config::Config;
use crate::error::SiftResult;
use crate::extract::{BrowserReviewExtractor, Extractor, HttpReviewExtractor, SnippetExtractor};
use crate::locate::{FindPageLocator, Locator, SearchQueryLocator, SuggestionLocator};
use crate::renderer::chromium::ChromiumLauncher;
use crate::renderer::Launcher;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which review source a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Scrape the movie database search page, then its reviews page.
    #[default]
    Imdb,
    /// Resolve the title through the suggestion service, then scrape reviews.
    Lookup,
    /// Scrape review snippets from a search engine results page.
    Search,
    /// Like `imdb`, but render the reviews page in headless Chromium.
    Browser,
}

/// How a source's records are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Positive and negative buckets.
    Classified,
    /// Plain snippet list.
    Snippets,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Imdb, Source::Lookup, Source::Search, Source::Browser];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Imdb => "imdb",
            Source::Lookup => "lookup",
            Source::Search => "search",
            Source::Browser => "browser",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Source::Imdb => "movie database search page + reviews page over HTTP",
            Source::Lookup => "title suggestion service + reviews page over HTTP",
            Source::Search => "search engine result snippets",
            Source::Browser => "movie database search page + reviews page in headless Chromium",
        }
    }

    pub fn presentation(&self) -> Presentation {
        match self {
            Source::Search => Presentation::Snippets,
            _ => Presentation::Classified,
        }
    }

    /// Build the locator/extractor pair for this source.
    pub fn build(&self, config: &Config) -> SiftResult<Pipeline> {
        let client = HttpClient::from_config(config)?;
        let find_page = || FindPageLocator::new(client.clone(), config.imdb_base.clone());

        let (locator, extractor): (Box<dyn Locator>, Box<dyn Extractor>) = match self {
            Source::Imdb => (
                Box::new(find_page()),
                Box::new(HttpReviewExtractor::new(client.clone())),
            ),
            Source::Lookup => (
                Box::new(SuggestionLocator::new(
                    client.clone(),
                    config.suggest_base.clone(),
                    config.imdb_base.clone(),
                )),
                Box::new(HttpReviewExtractor::new(client.clone())),
            ),
            Source::Search => (
                Box::new(SearchQueryLocator::new(config.search_base.clone())),
                Box::new(SnippetExtractor::new(client.clone())),
            ),
            Source::Browser => {
                let launcher: Arc<dyn Launcher> = Arc::new(ChromiumLauncher {
                    chrome_path: config.chromium_path.clone(),
                    user_agent: config.user_agent.clone(),
                });
                (
                    Box::new(find_page()),
                    Box::new(BrowserReviewExtractor::new(launcher, config.timeout_ms)),
                )
            }
        };

        Ok(Pipeline {
            source: *self,
            locator,
            extractor,
            presentation: self.presentation(),
        })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|src| src.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Source::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown source '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// A locator, an extractor, and how to present what they produce.
pub struct Pipeline {
    pub source: Source,
    pub locator: Box<dyn Locator>,
    pub extractor: Box<dyn Extractor>,
    pub presentation: Presentation,
}
