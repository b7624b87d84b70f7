//! The `dbquiz play` command (also the default).

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use dbquiz_core::bank::load_bank;
use dbquiz_core::config::QuizConfig;
use dbquiz_core::{seed, Storage};

use crate::console::Console;
use crate::menu::Menu;

pub async fn execute(config: QuizConfig) -> Result<()> {
    let mut storage = Storage::open(&config.database_path)
        .await
        .with_context(|| format!("failed to open database: {}", config.database_path.display()))?;

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    run_session(&mut storage, &config, console).await?;

    storage.close().await?;
    Ok(())
}

/// Seed the question bank, then hand the console to the menu.
pub async fn run_session<R: BufRead, W: Write>(
    storage: &mut Storage,
    config: &QuizConfig,
    mut console: Console<R, W>,
) -> Result<Console<R, W>> {
    let inserted = match &config.question_bank {
        Some(path) => {
            let bank = load_bank(path)?;
            seed::populate_from(storage, &bank.seeds()).await?
        }
        None => seed::populate_questions(storage).await?,
    };

    if inserted > 0 {
        if config.question_bank.is_some() {
            console.say(format_args!("{inserted} questions added to the database."))?;
        } else {
            console.say("DBMS questions added to the database.")?;
        }
    }

    Menu::new(storage, console).run().await
}
