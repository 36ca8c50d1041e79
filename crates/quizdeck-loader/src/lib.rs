//! quizdeck-loader: Question bank sources and configuration.
//!
//! Implements the `BankSource` trait for HTTP, local files, and in-memory
//! fixtures, maps quiz pages to bank resources, and loads `quizdeck.toml`.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;
pub mod topics;

pub use config::{load_config, load_config_from, QuizdeckConfig};
pub use file::FileSource;
pub use http::HttpSource;
pub use quizdeck_core::error::LoadError;
pub use topics::{Location, TopicEntry, TopicTable};

use quizdeck_core::model::QuestionBank;
use quizdeck_core::traits::BankSource;

/// Create the source that serves `location`.
pub fn open_source(location: &Location) -> Result<Box<dyn BankSource>, LoadError> {
    match location {
        Location::Url(url) => Ok(Box::new(HttpSource::new(url.clone())?)),
        Location::Path(path) => Ok(Box::new(FileSource::new(path.clone()))),
    }
}

/// Fetch a bank once. Failures are logged here and returned to the caller,
/// which is expected to give up on the session.
pub async fn load_bank(source: &dyn BankSource) -> Result<QuestionBank, LoadError> {
    match source.fetch().await {
        Ok(bank) => {
            tracing::info!(
                location = %source.location(),
                questions = bank.len(),
                "question bank loaded"
            );
            Ok(bank)
        }
        Err(e) => {
            tracing::error!("error fetching question bank from {}: {e}", source.location());
            Err(e)
        }
    }
}
