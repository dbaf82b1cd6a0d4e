//! Async HTTP client wrapping reqwest.
//!
//! Not a browser. Plain HTTP GETs with a fixed browser user-agent. One
//! request per call: no retries, no backoff.

use crate::config::Config;
use crate::error::{SiftError, SiftResult};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// HTTP client shared by the locators and extractors.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the given user-agent and per-request timeout.
    pub fn new(user_agent: &str, timeout_ms: u64) -> SiftResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> SiftResult<Self> {
        Self::new(&config.user_agent, config.timeout_ms)
    }

    /// GET `url` and return the body. Non-2xx statuses are errors.
    pub async fn get(&self, url: &str) -> SiftResult<HttpResponse> {
        tracing::debug!(url, "GET");
        let r = self.client.get(url).send().await?;

        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        if !r.status().is_success() {
            tracing::debug!(url, status, "non-success status");
            return Err(SiftError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = r.text().await?;
        tracing::debug!(url, status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> SiftResult<T> {
        let resp = self.get(url).await?;
        Ok(serde_json::from_str(&resp.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new("test-agent", 10000);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_get_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "sift-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new("sift-test/1.0", 5000).unwrap();
        let resp = client.get(&format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_get_error_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new("sift-test/1.0", 5000).unwrap();
        let err = client.get(&format!("{}/x", server.uri())).await.unwrap_err();
        assert!(matches!(err, SiftError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_get_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::new("sift-test/1.0", 50).unwrap();
        let err = client.get(&server.uri()).await.unwrap_err();
        assert!(matches!(err, SiftError::Transport(_)));
    }
}
