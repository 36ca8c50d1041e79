//! The `quizdeck reset` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_loader::config::load_config_from;

pub fn execute(
    page: String,
    store_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut store = super::open_store(&config, store_path)?;

    if store.clear(&page)? {
        println!("Cleared statuses for {page}.");
    } else {
        println!("No statuses stored for {page}.");
    }

    Ok(())
}
