//! TOML question-bank files.
//!
//! Lets an install seed its own questions instead of the built-in DBMS set.
//! A bank is only ever used by the seed loader, so it only matters the first
//! time a database is created.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{QuizError, Result};
use crate::model::{OptionLabel, SeedQuestion};

#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    question: String,
    options: Vec<String>,
    correct: String,
}

/// An owned question loaded from a bank file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankQuestion {
    pub text: String,
    pub options: [String; 4],
    pub correct: OptionLabel,
}

impl BankQuestion {
    pub fn as_seed(&self) -> SeedQuestion<'_> {
        SeedQuestion {
            text: &self.text,
            options: [
                &self.options[0],
                &self.options[1],
                &self.options[2],
                &self.options[3],
            ],
            correct: self.correct,
        }
    }
}

/// A parsed question bank.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pub questions: Vec<BankQuestion>,
}

impl QuestionBank {
    /// Borrowed seed records, in file order.
    pub fn seeds(&self) -> Vec<SeedQuestion<'_>> {
        self.questions.iter().map(BankQuestion::as_seed).collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Read and parse a bank file.
pub fn load_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        QuizError::QuestionBank(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_bank_str(&content, path)
}

/// Parse bank TOML (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content).map_err(|e| {
        QuizError::QuestionBank(format!("failed to parse {}: {e}", source_path.display()))
    })?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let options: [String; 4] = q.options.try_into().map_err(|opts: Vec<String>| {
                QuizError::QuestionBank(format!(
                    "question {} has {} options, expected 4",
                    i + 1,
                    opts.len()
                ))
            })?;
            let correct = q.correct.trim().parse::<OptionLabel>()?;
            Ok(BankQuestion {
                text: q.question,
                options,
                correct,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank { questions })
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// 1-based question position, if the warning is about one question.
    pub position: Option<usize>,
    pub message: String,
}

/// Check a bank for problems that parse cleanly but make a poor quiz.
pub fn validate_bank(bank: &QuestionBank) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    if bank.is_empty() {
        warnings.push(BankWarning {
            position: None,
            message: "bank has no questions; quiz attempts will be unavailable".into(),
        });
    }

    let mut seen = HashSet::new();
    for (i, q) in bank.questions.iter().enumerate() {
        let position = Some(i + 1);

        if q.text.trim().is_empty() {
            warnings.push(BankWarning {
                position,
                message: "question text is empty".into(),
            });
        } else if !seen.insert(q.text.trim()) {
            warnings.push(BankWarning {
                position,
                message: format!("duplicate question: {}", q.text.trim()),
            });
        }

        for label in OptionLabel::ALL {
            if q.options[label.index()].trim().is_empty() {
                warnings.push(BankWarning {
                    position,
                    message: format!("option {label} is empty"),
                });
            }
        }
    }

    warnings
}
