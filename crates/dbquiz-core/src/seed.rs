//! Question-bank seeding.
//!
//! The seed loader fills `Questions` once. It is safe to call on every
//! startup: if any question already exists it does nothing.

use crate::error::Result;
use crate::model::{OptionLabel, SeedQuestion};
use crate::storage::Storage;

/// The built-in DBMS question bank.
pub const DBMS_QUESTIONS: &[SeedQuestion<'static>] = &[
    SeedQuestion {
        text: "Which of the following is a valid SQL statement to retrieve all rows from a table?",
        options: [
            "SELECT * FROM table_name;",
            "GET ALL FROM table_name;",
            "FETCH * FROM table_name;",
            "EXTRACT * FROM table_name;",
        ],
        correct: OptionLabel::A,
    },
    SeedQuestion {
        text: "What does the term 'normalization' in DBMS refer to?",
        options: [
            "Ensuring the database runs faster.",
            "Dividing the database into smaller tables and eliminating redundancy.",
            "Backing up the database.",
            "Adding more data to the database.",
        ],
        correct: OptionLabel::B,
    },
    SeedQuestion {
        text: "In an ER diagram, an entity set is represented by:",
        options: ["Rectangle", "Ellipse", "Diamond", "Triangle"],
        correct: OptionLabel::A,
    },
    SeedQuestion {
        text: "A transaction in DBMS must follow which set of properties?",
        options: [
            "ACID (Atomicity, Consistency, Isolation, Durability)",
            "BASE (Basically Available, Soft State, Eventual Consistency)",
            "CRUD (Create, Read, Update, Delete)",
            "DML (Data Manipulation Language)",
        ],
        correct: OptionLabel::A,
    },
    SeedQuestion {
        text: "What is the primary purpose of an index in a database?",
        options: [
            "To increase data redundancy.",
            "To speed up query processing.",
            "To secure the data.",
            "To store a backup of the data.",
        ],
        correct: OptionLabel::B,
    },
];

/// Seed the built-in DBMS questions. Returns the number of rows inserted.
pub async fn populate_questions(storage: &mut Storage) -> Result<usize> {
    populate_from(storage, DBMS_QUESTIONS).await
}

/// Seed `bank` if `Questions` is empty. Returns the number of rows inserted,
/// which is zero whenever the table already held at least one question.
pub async fn populate_from(storage: &mut Storage, bank: &[SeedQuestion<'_>]) -> Result<usize> {
    let existing = storage.count_questions().await?;
    if existing > 0 {
        tracing::debug!(existing, "question bank already populated");
        return Ok(0);
    }

    for question in bank {
        storage.insert_question(question).await?;
    }

    tracing::info!(count = bank.len(), "seeded question bank");
    Ok(bank.len())
}
