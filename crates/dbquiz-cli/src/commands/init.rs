//! The `dbquiz init` command.

use std::path::Path;

use anyhow::Result;

use dbquiz_core::config::CONFIG_FILE_NAME;

const BANK_FILE_NAME: &str = "questions.toml";

pub fn execute() -> Result<()> {
    write_if_absent(Path::new(CONFIG_FILE_NAME), SAMPLE_CONFIG)?;
    write_if_absent(Path::new(BANK_FILE_NAME), EXAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Edit {BANK_FILE_NAME} and uncomment question_bank in {CONFIG_FILE_NAME}");
    println!("  2. Run: dbquiz validate --bank {BANK_FILE_NAME}");
    println!("  3. Run: dbquiz");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# dbquiz configuration

# SQLite database file, created on first run.
database_path = "quiz_app.db"

# Seed an empty database from this file instead of the built-in questions.
# question_bank = "questions.toml"
"#;

const EXAMPLE_BANK: &str = r#"# dbquiz question bank
#
# Each question needs exactly four options and a correct label (A-D).

[[questions]]
question = "Which key uniquely identifies each row in a table?"
options = ["Primary key", "Foreign key", "Composite attribute", "Derived attribute"]
correct = "A"

[[questions]]
question = "Which SQL clause filters groups produced by GROUP BY?"
options = ["WHERE", "HAVING", "ORDER BY", "LIMIT"]
correct = "B"

[[questions]]
question = "Which normal form removes transitive dependencies?"
options = ["1NF", "2NF", "3NF", "4NF"]
correct = "C"
"#;
