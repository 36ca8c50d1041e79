//! quizdeck CLI: take multiple-choice exams from a question bank in the
//! terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Terminal runner for multiple-choice exam banks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz session, interactively or from `--answers`
    Take {
        /// Quiz page path (e.g. "/az-dili.html")
        #[arg(long)]
        page: String,

        /// Bank file or URL, bypassing the topic table
        #[arg(long)]
        bank: Option<String>,

        /// Questions per session (default from config, else 25)
        #[arg(long)]
        count: Option<usize>,

        /// Seed for question and option shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Status store file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for session reports written after each check
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: json, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Answer without menus and check once, e.g. `--answers 1A,2C,3B`
        #[arg(long, value_delimiter = ',')]
        answers: Vec<commands::take::AnswerArg>,
    },

    /// Show every bank question of a page with its status
    Status {
        /// Quiz page path
        #[arg(long)]
        page: String,

        /// Bank file or URL, bypassing the topic table
        #[arg(long)]
        bank: Option<String>,

        /// Status store file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Forget the statuses of one page
    Reset {
        /// Quiz page path
        #[arg(long)]
        page: String,

        /// Status store file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write an HTML page for a fresh session
    Render {
        /// Quiz page path
        #[arg(long)]
        page: String,

        /// Output HTML file
        #[arg(long)]
        output: PathBuf,

        /// Bank file or URL, bypassing the topic table
        #[arg(long)]
        bank: Option<String>,

        /// Questions per session
        #[arg(long)]
        count: Option<usize>,

        /// Seed for question and option shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Status store file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a bank file for authoring mistakes
    Validate {
        /// Path to the bank JSON file
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and sample bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizdeck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            page,
            bank,
            count,
            seed,
            store,
            config,
            output,
            format,
            answers,
        } => {
            commands::take::execute(page, bank, count, seed, store, config, output, format, answers)
                .await
        }
        Commands::Status {
            page,
            bank,
            store,
            config,
        } => commands::status::execute(page, bank, store, config).await,
        Commands::Reset {
            page,
            store,
            config,
        } => commands::reset::execute(page, store, config),
        Commands::Render {
            page,
            output,
            bank,
            count,
            seed,
            store,
            config,
        } => commands::render::execute(page, output, bank, count, seed, store, config).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
