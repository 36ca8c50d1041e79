//! The `quizdeck status` command.

use std::path::PathBuf;

use anyhow::Result;
use quizdeck_core::selector::remaining;
use quizdeck_core::view::nav_panel;
use quizdeck_loader::config::load_config_from;
use quizdeck_report::table::status_table;
use quizdeck_report::text::format_totals;

pub async fn execute(
    page: String,
    bank: Option<String>,
    store_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = super::fetch_bank(&config, &page, bank.as_deref()).await?;
    let store = super::open_store(&config, store_path)?;
    let statuses = store.load(&page);

    let panel = nav_panel(&bank, &statuses);
    println!("Page: {page} ({} questions)", bank.len());
    println!("{}", status_table(&panel));
    println!("{}", format_totals(&panel));
    println!(
        "{} of {} questions left to answer correctly.",
        remaining(&bank, &statuses),
        bank.len()
    );

    Ok(())
}
