// src/fetch.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One GET per call, with a per-request timeout
// - No retries: the crawler decides what a failure means
// - Transport failures are sorted into timeout / connection / other
//
// The crawler talks to a `PageFetcher` trait instead of reqwest directly,
// so tests can crawl an in-memory site without touching the network.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

// Why a fetch did not produce a response at all
//
// A response with a bad status code is NOT a FetchError: it comes back as a
// FetchResponse and the crawler inspects the status itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Status code and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// The crawler only accepts exactly 200, like the reference scraper.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Anything that can GET a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError>;
}

/// The real fetcher, backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // The client is reused for every request (connection pooling)
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(categorize_error)?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}

// Sorts reqwest errors into our three kinds
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::ConnectionFailed(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<title>Hello</title>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new("test-agent").unwrap();
        let response = fetcher
            .get(&server.url(), Duration::from_secs(5))
            .await
            .unwrap();

        assert!(response.is_ok());
        assert_eq!(response.body, b"<title>Hello</title>".to_vec());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_passes_through_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new("test-agent").unwrap();
        let url = format!("{}/missing", server.url());
        let response = fetcher.get(&url, Duration::from_secs(5)).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn test_get_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "site-scraper-test")
            .with_status(200)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new("site-scraper-test").unwrap();
        fetcher
            .get(&server.url(), Duration::from_secs(5))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_failure() {
        // Bind then drop a listener so the port is very likely closed
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let fetcher = HttpFetcher::new("test-agent").unwrap();
        let url = format!("http://127.0.0.1:{}/", port);
        let err = fetcher.get(&url, Duration::from_secs(5)).await.unwrap_err();

        assert!(matches!(err, FetchError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_silent_server_is_timeout() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let fetcher = HttpFetcher::new("test-agent").unwrap();
        let url = format!("http://{}/", addr);
        let result = fetcher.get(&url, Duration::from_millis(300)).await;

        assert_eq!(result, Err(FetchError::Timeout));
        server.abort();
    }

    #[test]
    fn test_only_200_is_ok() {
        let redirect = FetchResponse {
            status: 301,
            body: Vec::new(),
        };
        let created = FetchResponse {
            status: 201,
            body: Vec::new(),
        };
        assert!(!redirect.is_ok());
        assert!(!created.is_ok());
    }
}
