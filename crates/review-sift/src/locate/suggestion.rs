//! Title lookup through the movie database's JSON suggestion service.

use super::Locator;
use crate::acquisition::HttpClient;
use crate::error::{SiftError, SiftResult};
use async_trait::async_trait;
use serde::Deserialize;

/// Suggestion service response.
#[derive(Debug, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default, rename = "d")]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default, rename = "l")]
    pub label: Option<String>,
    #[serde(default, rename = "y")]
    pub year: Option<i32>,
}

/// Suggestion URL: `/suggestion/<first char>/<title>.json`.
pub fn suggestion_url(base: &str, title: &str) -> SiftResult<String> {
    let query = title.trim().to_lowercase();
    let bucket = query
        .chars()
        .find(|c| c.is_ascii_alphanumeric())
        .unwrap_or('x')
        .to_string();

    let file = format!("{query}.json");

    let mut url = url::Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| SiftError::Config(format!("'{base}' cannot be a base URL")))?
        .pop_if_empty()
        .extend(["suggestion", bucket.as_str(), file.as_str()]);
    Ok(url.to_string())
}

/// First candidate that is a title (`tt…` id).
pub fn first_title(resp: &SuggestionResponse) -> Option<&Candidate> {
    resp.candidates.iter().find(|c| c.id.starts_with("tt"))
}

pub struct SuggestionLocator {
    client: HttpClient,
    suggest_base: String,
    title_base: String,
}

impl SuggestionLocator {
    pub fn new(
        client: HttpClient,
        suggest_base: impl Into<String>,
        title_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            suggest_base: suggest_base.into(),
            title_base: title_base.into(),
        }
    }
}

#[async_trait]
impl Locator for SuggestionLocator {
    fn name(&self) -> &'static str {
        "suggestion"
    }

    async fn locate(&self, title: &str) -> SiftResult<Option<String>> {
        let url = suggestion_url(&self.suggest_base, title)?;
        let resp: SuggestionResponse = self.client.get_json(&url).await?;

        Ok(first_title(&resp).map(|c| {
            tracing::debug!(
                id = %c.id,
                label = c.label.as_deref().unwrap_or(""),
                year = c.year,
                "suggestion match"
            );
            format!("{}/title/{}/", self.title_base, c.id)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_url() {
        assert_eq!(
            suggestion_url("https://v3.sg.media-imdb.com", "The Dark Knight").unwrap(),
            "https://v3.sg.media-imdb.com/suggestion/t/the%20dark%20knight.json"
        );
        assert_eq!(
            suggestion_url("http://127.0.0.1:8080", "  !!!  ").unwrap(),
            "http://127.0.0.1:8080/suggestion/x/!!!.json"
        );
    }

    #[test]
    fn test_first_title_skips_people() {
        let resp: SuggestionResponse = serde_json::from_str(
            r#"{"d":[
                {"id":"nm0634240","l":"Christopher Nolan"},
                {"id":"tt0468569","l":"The Dark Knight","y":2008,"qid":"movie"}
            ],"q":"the dark knight","v":1}"#,
        )
        .unwrap();
        let c = first_title(&resp).unwrap();
        assert_eq!(c.id, "tt0468569");
        assert_eq!(c.year, Some(2008));
    }

    #[test]
    fn test_missing_candidates_field() {
        let resp: SuggestionResponse = serde_json::from_str(r#"{"q":"zzzz","v":1}"#).unwrap();
        assert!(first_title(&resp).is_none());
    }
}
