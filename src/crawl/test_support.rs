// In-memory site used by the crawler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::fetch::{FetchError, FetchResponse, PageFetcher};

enum FakePage {
    Html(String),
    Status(u16),
    Fail(FetchError),
}

/// Serves canned pages and remembers every URL it was asked for.
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, FakePage>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, title: &str, links: &[&str]) -> Self {
        let anchors: String = links
            .iter()
            .map(|href| format!("<a href=\"{}\">link</a>", href))
            .collect();
        let html = format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, anchors
        );
        self.pages.insert(url.to_string(), FakePage::Html(html));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), FakePage::Status(status));
        self
    }

    pub fn failing(mut self, url: &str, error: FetchError) -> Self {
        self.pages.insert(url.to_string(), FakePage::Fail(error));
        self
    }

    /// Shared log of requested URLs, readable after the site is moved
    /// into the engine.
    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<FetchResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some(FakePage::Html(html)) => Ok(FetchResponse {
                status: 200,
                body: html.clone().into_bytes(),
            }),
            Some(FakePage::Status(status)) => Ok(FetchResponse {
                status: *status,
                body: Vec::new(),
            }),
            Some(FakePage::Fail(error)) => Err(error.clone()),
            None => Ok(FetchResponse {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

pub fn requested(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}
