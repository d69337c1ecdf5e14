//! Mock extractor for session tests
//!
//! Answers per Instagram URL with a scripted payload or error after a
//! configurable delay, and counts started/finished calls so tests can prove
//! that superseded requests were cancelled.

#![allow(dead_code)]

use async_trait::async_trait;
use instagrab::{FetchError, MediaExtractor};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Scripted answer for one URL
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub delay: Duration,
    pub result: Result<Value, FetchError>,
}

impl MockResponse {
    pub fn ok(payload: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(payload),
        }
    }

    pub fn err(error: FetchError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Default)]
pub struct MockExtractor {
    responses: HashMap<String, MockResponse>,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the answer for `url` (matched on the parsed URL's string form)
    pub fn with(mut self, url: &str, response: MockResponse) -> Self {
        let key = Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| url.to_string());
        self.responses.insert(key, response);
        self
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaExtractor for MockExtractor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, url: &Url) -> Result<Value, FetchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| MockResponse::err(FetchError::Network(format!("no mock for {}", url))));

        if !response.delay.is_zero() {
            sleep(response.delay).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
        response.result
    }
}
