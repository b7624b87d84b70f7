//! Error types for dbquiz.
//!
//! Expected failures (a taken username, a blank field) are kept apart from
//! storage failures so the menu can report them and carry on without
//! string matching.

use thiserror::Error;

use crate::model::UserId;

/// Convenience alias used throughout the crate.
pub type Result<T, E = QuizError> = std::result::Result<T, E>;

/// Errors raised by the storage layer and the services built on it.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Registration hit the unique constraint on `Users.username`.
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// A required text field was empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A correct-option label outside A-D.
    #[error("invalid option label: {0:?}")]
    InvalidLabel(String),

    /// A score was written for a user id with no `Users` row.
    #[error("no user with id {0}")]
    UnknownUser(UserId),

    /// A question-bank file could not be read or parsed.
    #[error("question bank: {0}")]
    QuestionBank(String),

    /// Reading an answer from the caller failed.
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other storage failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl QuizError {
    /// Returns `true` for failures the interactive loop reports and moves past.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuizError::DuplicateUsername(_) | QuizError::EmptyField(_)
        )
    }
}

/// Returns `true` if a sqlx error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Returns `true` if a sqlx error is a FOREIGN KEY constraint violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_foreign_key_violation(),
        _ => false,
    }
}
