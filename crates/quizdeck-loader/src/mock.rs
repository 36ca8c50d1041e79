//! In-memory source for tests.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizdeck_core::bank::parse_bank_str;
use quizdeck_core::error::LoadError;
use quizdeck_core::model::QuestionBank;
use quizdeck_core::traits::BankSource;

/// Serves a fixed body, or fails with a fixed HTTP status.
pub struct MockSource {
    body: Result<String, u16>,
    call_count: AtomicU32,
}

impl MockSource {
    /// A source that always returns `json` as the response body.
    pub fn with_json(json: &str) -> Self {
        Self {
            body: Ok(json.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// A source that always answers with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            body: Err(status),
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BankSource for MockSource {
    fn location(&self) -> String {
        "mock://bank".to_string()
    }

    async fn fetch(&self) -> Result<QuestionBank, LoadError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.body {
            Ok(json) => parse_bank_str(json),
            Err(status) => Err(LoadError::HttpStatus {
                status: *status,
                url: self.location(),
            }),
        }
    }
}
