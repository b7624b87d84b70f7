//! dbquiz CLI: a terminal DBMS quiz backed by SQLite.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;
mod menu;

#[derive(Parser)]
#[command(name = "dbquiz", version, about = "Terminal DBMS quiz backed by SQLite")]
struct Cli {
    /// Config file path (default: ./dbquiz.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides config and DBQUIZ_DATABASE)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive quiz (default)
    Play,

    /// Create a starter config and example question bank
    Init,

    /// Validate a question bank TOML file
    Validate {
        /// Path to the question bank
        #[arg(long)]
        bank: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dbquiz=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => match load_config(cli.config, cli.database) {
            Ok(config) => commands::play::execute(config).await,
            Err(e) => Err(e),
        },
        Commands::Init => commands::init::execute(),
        Commands::Validate { bank } => commands::validate::execute(bank),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn load_config(
    config_path: Option<PathBuf>,
    database: Option<PathBuf>,
) -> anyhow::Result<dbquiz_core::config::QuizConfig> {
    let mut config = dbquiz_core::config::load_config_from(config_path.as_deref())?;
    if let Some(database) = database {
        config.database_path = database;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
