//! Per-user score history.

use std::fmt;

use crate::error::Result;
use crate::model::UserId;
use crate::storage::Storage;

/// One past attempt, numbered from 1 in the order it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub number: usize,
    pub score: i64,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attempt {}: {} points", self.number, self.score)
    }
}

/// Every recorded attempt for `user_id`, oldest first. Read-only.
pub async fn view_results(storage: &mut Storage, user_id: UserId) -> Result<Vec<Attempt>> {
    let scores = storage.scores_for(user_id).await?;
    tracing::debug!(user_id = %user_id, attempts = scores.len(), "loaded results");

    Ok(scores
        .into_iter()
        .enumerate()
        .map(|(i, s)| Attempt {
            number: i + 1,
            score: s.score,
        })
        .collect())
}
