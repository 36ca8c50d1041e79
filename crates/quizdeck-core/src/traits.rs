//! Core trait definitions for question bank sources.
//!
//! Implemented by the `quizdeck-loader` crate for HTTP, local files, and
//! in-memory fixtures.

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::QuestionBank;

/// Something a question bank can be fetched from.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Human-readable location (URL or path), used in logs.
    fn location(&self) -> String;

    /// Fetch and decode the bank. One attempt, no retries.
    async fn fetch(&self) -> Result<QuestionBank, LoadError>;
}
