//! Core data model types for dbquiz.
//!
//! Mirrors the three persisted tables (`Users`, `Questions`, `Scores`) plus
//! the borrowed seed record used to populate the question bank.

use std::fmt;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::error::QuizError;

/// Row id of a `Users` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Stored exactly as entered.
    pub password: String,
}

/// One of the four answer labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in display order.
    pub const ALL: [OptionLabel; 4] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
    ];

    /// Zero-based position of this label among the options.
    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            _ => Err(QuizError::InvalidLabel(s.to_string())),
        }
    }
}

/// A multiple-choice question as stored in `Questions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    /// Option texts, indexed by [`OptionLabel::index`].
    pub options: [String; 4],
    pub correct: OptionLabel,
}

impl Question {
    /// Text of the option behind `label`.
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    /// Labels paired with their option text, in A-D order.
    pub fn labeled_options(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL
            .into_iter()
            .map(move |label| (label, self.option(label)))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Question {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let correct: String = row.try_get("correct_option")?;
        let correct = correct
            .parse::<OptionLabel>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "correct_option".into(),
                source: Box::new(e),
            })?;

        Ok(Question {
            id: row.try_get("id")?,
            text: row.try_get("question")?,
            options: [
                row.try_get("option_a")?,
                row.try_get("option_b")?,
                row.try_get("option_c")?,
                row.try_get("option_d")?,
            ],
            correct,
        })
    }
}

/// A question waiting to be inserted by the seed loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedQuestion<'a> {
    pub text: &'a str,
    pub options: [&'a str; 4],
    pub correct: OptionLabel,
}

/// One recorded quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Score {
    pub id: i64,
    pub user_id: UserId,
    pub score: i64,
}
