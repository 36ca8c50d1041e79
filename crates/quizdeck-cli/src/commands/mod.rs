pub mod init;
pub mod render;
pub mod reset;
pub mod status;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizdeck_core::model::QuestionBank;
use quizdeck_core::session::SessionConfig;
use quizdeck_core::store::StatusStore;
use quizdeck_loader::{load_bank, open_source, Location, QuizdeckConfig};
use quizdeck_store::{default_store_path, FileStorage};

/// Open the status store: `--store`, then config (or `QUIZDECK_STORE`),
/// then the default location.
pub fn open_store(
    config: &QuizdeckConfig,
    store_path: Option<PathBuf>,
) -> Result<StatusStore<FileStorage>> {
    let path = store_path
        .or_else(|| config.store_path.clone())
        .unwrap_or_else(default_store_path);
    let storage = FileStorage::open(path.clone())
        .with_context(|| format!("failed to open status store {}", path.display()))?;
    Ok(StatusStore::new(storage))
}

/// Fetch the bank for `page`, or from `bank` when given.
pub async fn fetch_bank(
    config: &QuizdeckConfig,
    page: &str,
    bank: Option<&str>,
) -> Result<QuestionBank> {
    let location = match bank {
        Some(b) => Location::parse(b),
        None => config.topic_table().locate(page, config.base.as_deref())?,
    };
    let source = open_source(&location)?;
    let bank = load_bank(source.as_ref())
        .await
        .with_context(|| format!("failed to load question bank for {page}"))?;
    Ok(bank)
}

/// Session parameters from config, with `--count` taking precedence.
pub fn session_config(config: &QuizdeckConfig, count: Option<usize>) -> Result<SessionConfig> {
    let mut session = config.session_config();
    if let Some(n) = count {
        anyhow::ensure!(n >= 1, "count must be at least 1");
        session.sample_size = n;
    }
    Ok(session)
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
