//! The `quizdeck render` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::session::QuizSession;
use quizdeck_core::view::{nav_panel, question_views};
use quizdeck_loader::config::load_config_from;
use quizdeck_report::html::{write_html_report, HtmlPage};

pub async fn execute(
    page: String,
    output: PathBuf,
    bank: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    store_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let session_config = super::session_config(&config, count)?;
    let bank = super::fetch_bank(&config, &page, bank.as_deref()).await?;
    let store = super::open_store(&config, store_path)?;
    let statuses = store.load(&page);

    let mut rng = super::make_rng(seed);
    let session = QuizSession::start(page.as_str(), &bank, &statuses, &session_config, &mut rng);

    let views = question_views(&session);
    let nav = nav_panel(&bank, &statuses);
    write_html_report(
        &HtmlPage {
            title: &page,
            questions: &views,
            nav: &nav,
            card: None,
        },
        &output,
    )?;

    println!("{} questions rendered.", session.len());
    println!("HTML page: {}", output.display());
    Ok(())
}
