//! The interactive menu, a two-level state machine.
//!
//! ```text
//!            login ok
//!   Main ─────────────▶ User(id)
//!    ▲  │                  │
//!    │  └─ exit / EOF ─▶ Exit ◀─ EOF
//!    └──── logout ─────────┘
//! ```
//!
//! Unrecognized choices re-prompt in the same state.

use std::io::{BufRead, Write};

use anyhow::Result;

use dbquiz_core::quiz::{attempt_quiz, QuizOutcome};
use dbquiz_core::results::view_results;
use dbquiz_core::{accounts, QuizError, Storage, UserId};

use crate::console::Console;

/// Where the menu loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    User(UserId),
    Exit,
}

pub struct Menu<'a, R, W> {
    storage: &'a mut Storage,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(storage: &'a mut Storage, console: Console<R, W>) -> Self {
        Self { storage, console }
    }

    /// Drive the state machine until it reaches [`MenuState::Exit`].
    pub async fn run(mut self) -> Result<Console<R, W>> {
        let mut state = MenuState::Main;
        loop {
            state = match state {
                MenuState::Main => self.main_menu().await?,
                MenuState::User(user_id) => self.user_menu(user_id).await?,
                MenuState::Exit => break,
            };
        }
        self.console.say("Thank you for using the Quiz App!")?;
        Ok(self.console)
    }

    async fn main_menu(&mut self) -> Result<MenuState> {
        self.console.say("\n--- Quiz App Menu ---")?;
        self.console.say("1. Register")?;
        self.console.say("2. Login")?;
        self.console.say("3. Exit")?;

        let Some(choice) = self.console.prompt("Enter your choice: ")? else {
            return Ok(MenuState::Exit);
        };

        match choice.trim() {
            "1" => self.register().await,
            "2" => self.login().await,
            "3" => Ok(MenuState::Exit),
            _ => {
                self.console.say("Invalid choice. Please try again.")?;
                Ok(MenuState::Main)
            }
        }
    }

    async fn user_menu(&mut self, user_id: UserId) -> Result<MenuState> {
        self.console.say("\n--- User Menu ---")?;
        self.console.say("1. Attempt Quiz")?;
        self.console.say("2. View Results")?;
        self.console.say("3. Logout")?;

        let Some(choice) = self.console.prompt("Enter your choice: ")? else {
            return Ok(MenuState::Exit);
        };

        match choice.trim() {
            "1" => self.attempt_quiz(user_id).await,
            "2" => {
                self.view_results(user_id).await?;
                Ok(MenuState::User(user_id))
            }
            "3" => Ok(MenuState::Main),
            _ => {
                self.console.say("Invalid choice. Please try again.")?;
                Ok(MenuState::User(user_id))
            }
        }
    }

    async fn register(&mut self) -> Result<MenuState> {
        let Some(username) = self.console.prompt("Enter a username: ")? else {
            return Ok(MenuState::Exit);
        };
        let Some(password) = self.console.prompt("Enter a password: ")? else {
            return Ok(MenuState::Exit);
        };

        match accounts::register(self.storage, &username, &password).await {
            Ok(_) => self.console.say("Registration successful!")?,
            Err(QuizError::DuplicateUsername(_)) => self
                .console
                .say("Username already exists. Please try a different one.")?,
            Err(e) if e.is_recoverable() => {
                self.console.say(format_args!("Registration failed: {e}."))?
            }
            Err(e) => return Err(e.into()),
        }
        Ok(MenuState::Main)
    }

    async fn login(&mut self) -> Result<MenuState> {
        let Some(username) = self.console.prompt("Enter your username: ")? else {
            return Ok(MenuState::Exit);
        };
        let Some(password) = self.console.prompt("Enter your password: ")? else {
            return Ok(MenuState::Exit);
        };

        match accounts::login(self.storage, &username, &password).await? {
            Some(user_id) => {
                self.console.say("Login successful!")?;
                Ok(MenuState::User(user_id))
            }
            None => {
                self.console.say("Invalid credentials. Please try again.")?;
                Ok(MenuState::Main)
            }
        }
    }

    async fn attempt_quiz(&mut self, user_id: UserId) -> Result<MenuState> {
        match attempt_quiz(self.storage, user_id, &mut self.console).await? {
            QuizOutcome::Unavailable => {
                self.console
                    .say("No questions available in the database. Please contact the admin.")?;
            }
            QuizOutcome::Abandoned { .. } => {
                self.console.say("\nQuiz abandoned. No score was recorded.")?;
                return Ok(MenuState::Exit);
            }
            QuizOutcome::Completed { score, .. } => {
                self.console.say(format_args!("\nYou scored: {score}"))?;
            }
        }
        Ok(MenuState::User(user_id))
    }

    async fn view_results(&mut self, user_id: UserId) -> Result<()> {
        let attempts = view_results(self.storage, user_id).await?;
        if attempts.is_empty() {
            self.console
                .say("\nNo scores found. You haven't attempted any quizzes yet.")?;
            return Ok(());
        }

        self.console.say("\nYour Scores:")?;
        for attempt in &attempts {
            self.console.say(attempt)?;
        }
        Ok(())
    }
}
