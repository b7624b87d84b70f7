//! SQLite storage handle.
//!
//! [`Storage`] owns the one connection the process uses. It is opened at
//! startup, passed by `&mut` to each service, and closed on shutdown. Every
//! mutating statement commits on its own; nothing here opens a transaction
//! that spans more than one statement.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

use crate::error::{is_foreign_key_violation, is_unique_violation, QuizError, Result};
use crate::model::{Question, Score, SeedQuestion, User, UserId};

const CREATE_USERS: &str = "
CREATE TABLE IF NOT EXISTS Users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
)";

const CREATE_QUESTIONS: &str = "
CREATE TABLE IF NOT EXISTS Questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    option_a TEXT NOT NULL,
    option_b TEXT NOT NULL,
    option_c TEXT NOT NULL,
    option_d TEXT NOT NULL,
    correct_option TEXT NOT NULL
)";

const CREATE_SCORES: &str = "
CREATE TABLE IF NOT EXISTS Scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    score INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES Users(id)
)";

/// The process-wide database handle.
#[derive(Debug)]
pub struct Storage {
    conn: SqliteConnection,
}

impl Storage {
    /// Open (creating if absent) the database file at `path` and make sure
    /// the schema exists.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        tracing::debug!(path = %path.display(), "opening database");
        Self::connect(options).await
    }

    /// Open a private in-memory database. Contents vanish on drop.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self> {
        let conn = SqliteConnection::connect_with(&options).await?;
        let mut storage = Self { conn };
        storage.ensure_schema().await?;
        Ok(storage)
    }

    /// Create the three tables if they are missing. Never drops anything.
    pub async fn ensure_schema(&mut self) -> Result<()> {
        for ddl in [CREATE_USERS, CREATE_QUESTIONS, CREATE_SCORES] {
            sqlx::query(ddl).execute(&mut self.conn).await?;
        }
        Ok(())
    }

    /// Release the connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    /// Insert a user row, mapping a UNIQUE violation to
    /// [`QuizError::DuplicateUsername`].
    pub async fn insert_user(&mut self, username: &str, password: &str) -> Result<UserId> {
        let result = sqlx::query("INSERT INTO Users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(&mut self.conn)
            .await;

        match result {
            Ok(done) => Ok(UserId(done.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => {
                Err(QuizError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The user whose username and password both match exactly.
    pub async fn find_user(&mut self, username: &str, password: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM Users WHERE username = ? AND password = ?",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&mut self.conn)
        .await?;
        Ok(user)
    }

    /// Number of rows whose username equals `username`.
    ///
    /// Not used by the quiz flow. Tests in this crate and in `dbquiz-cli`
    /// use it to assert on table contents, so it stays public.
    pub async fn count_users_named(&mut self, username: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Users WHERE username = ?")
            .bind(username)
            .fetch_one(&mut self.conn)
            .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Questions
    // -----------------------------------------------------------------------

    pub async fn count_questions(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Questions")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(count)
    }

    pub async fn insert_question(&mut self, question: &SeedQuestion<'_>) -> Result<i64> {
        let [a, b, c, d] = question.options;
        let done = sqlx::query(
            "INSERT INTO Questions (question, option_a, option_b, option_c, option_d, correct_option)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(question.text)
        .bind(a)
        .bind(b)
        .bind(c)
        .bind(d)
        .bind(question.correct.as_str())
        .execute(&mut self.conn)
        .await?;
        Ok(done.last_insert_rowid())
    }

    /// Every question, in insertion order.
    pub async fn questions(&mut self) -> Result<Vec<Question>> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, option_a, option_b, option_c, option_d, correct_option
             FROM Questions ORDER BY id",
        )
        .fetch_all(&mut self.conn)
        .await?;
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Scores
    // -----------------------------------------------------------------------

    /// Record one attempt. Fails with [`QuizError::UnknownUser`] if
    /// `user_id` has no `Users` row.
    pub async fn insert_score(&mut self, user_id: UserId, score: i64) -> Result<i64> {
        let result = sqlx::query("INSERT INTO Scores (user_id, score) VALUES (?, ?)")
            .bind(user_id)
            .bind(score)
            .execute(&mut self.conn)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(e) if is_foreign_key_violation(&e) => Err(QuizError::UnknownUser(user_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// All scores for `user_id`, in insertion order.
    pub async fn scores_for(&mut self, user_id: UserId) -> Result<Vec<Score>> {
        let rows = sqlx::query_as::<_, Score>(
            "SELECT id, user_id, score FROM Scores WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&mut self.conn)
        .await?;
        Ok(rows)
    }

    /// Total rows in `Scores` across all users. Diagnostic only, like
    /// [`Storage::count_users_named`].
    pub async fn count_scores(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Scores")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(count)
    }
}
