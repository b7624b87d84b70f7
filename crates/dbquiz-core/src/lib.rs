//! dbquiz-core: storage, accounts, and scoring for the dbquiz terminal quiz.
//!
//! Every operation here runs against a single [`storage::Storage`] handle
//! that owns one SQLite connection for the lifetime of the process.

pub mod accounts;
pub mod bank;
pub mod config;
pub mod error;
pub mod model;
pub mod quiz;
pub mod results;
pub mod seed;
pub mod storage;

pub use error::{QuizError, Result};
pub use model::{OptionLabel, Question, Score, SeedQuestion, User, UserId};
pub use storage::Storage;
