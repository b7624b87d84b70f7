//! Configuration loading.
//!
//! Everything here is optional. With no config file, no environment
//! override, and no flags, the database is `quiz_app.db` in the working
//! directory and the built-in questions are used.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "dbquiz.toml";

/// Environment variable that overrides `database_path`.
pub const DATABASE_ENV_VAR: &str = "DBQUIZ_DATABASE";

/// Top-level dbquiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// SQLite database file, created if absent.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// TOML question bank used instead of the built-in questions when
    /// seeding an empty database.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("quiz_app.db")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            question_bank: None,
        }
    }
}

/// Load config from an explicit path (which must exist), or from
/// `dbquiz.toml` in the working directory if present.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Some(db) = std::env::var_os(DATABASE_ENV_VAR).filter(|v| !v.is_empty()) {
        config.database_path = PathBuf::from(db);
    }

    Ok(config)
}

/// Parse config TOML.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.database_path, PathBuf::from("quiz_app.db"));
        assert!(config.question_bank.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str("question_bank = \"bank.toml\"").unwrap();
        assert_eq!(config.database_path, PathBuf::from("quiz_app.db"));
        assert_eq!(config.question_bank, Some(PathBuf::from("bank.toml")));
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
database_path = "/tmp/quiz.db"
question_bank = "questions.toml"
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/quiz.db"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "question_bank = \"mine.toml\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.question_bank, Some(PathBuf::from("mine.toml")));
    }
}
