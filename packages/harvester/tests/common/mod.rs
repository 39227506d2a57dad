//! Shared test doubles for the harvester integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use gesetze_harvester::http::Fetch;
use gesetze_harvester::pacing::RateLimiter;
use gesetze_harvester::{HarvesterError, Result};

/// Load a fixture file below `tests/fixtures`.
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Serves pages from memory and records every requested URL.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    requests: RefCell<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Body served for any URL without a registered page.
    pub fn fallback(mut self, html: impl Into<String>) -> Self {
        self.fallback = Some(html.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Fetch for FixtureFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| HarvesterError::Io(io::Error::new(io::ErrorKind::NotFound, url.to_string())))
    }
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingLimiter {
    pauses: RefCell<Vec<Duration>>,
}

impl RecordingLimiter {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.borrow().clone()
    }
}

impl RateLimiter for RecordingLimiter {
    fn wait(&self, delay: Duration) {
        self.pauses.borrow_mut().push(delay);
    }
}
