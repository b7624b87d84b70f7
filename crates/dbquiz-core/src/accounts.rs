//! Registration and login.
//!
//! Credentials are compared as stored, byte for byte. There is no hashing,
//! lockout, or rate limiting.

use crate::error::{QuizError, Result};
use crate::model::UserId;
use crate::storage::Storage;

/// Create a new account. Blank usernames or passwords are rejected before
/// touching storage; a taken username yields [`QuizError::DuplicateUsername`]
/// and leaves the table unchanged.
pub async fn register(storage: &mut Storage, username: &str, password: &str) -> Result<UserId> {
    if username.trim().is_empty() {
        return Err(QuizError::EmptyField("username"));
    }
    if password.trim().is_empty() {
        return Err(QuizError::EmptyField("password"));
    }

    match storage.insert_user(username, password).await {
        Ok(id) => {
            tracing::info!(user_id = %id, username, "registered user");
            Ok(id)
        }
        Err(e) => {
            if e.is_recoverable() {
                tracing::debug!(username, "registration rejected: {e}");
            }
            Err(e)
        }
    }
}

/// Look up the account matching both fields exactly (case-sensitive).
pub async fn login(storage: &mut Storage, username: &str, password: &str) -> Result<Option<UserId>> {
    let found = storage
        .find_user(username, password)
        .await?
        .map(|user| user.id);
    match found {
        Some(id) => tracing::info!(user_id = %id, username, "login succeeded"),
        None => tracing::debug!(username, "login failed"),
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_login() {
        let mut storage = Storage::open_in_memory().await.unwrap();
        let id = register(&mut storage, "alice", "pw1").await.unwrap();
        assert_eq!(login(&mut storage, "alice", "pw1").await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn duplicate_registration_keeps_one_row() {
        let mut storage = Storage::open_in_memory().await.unwrap();
        register(&mut storage, "alice", "pw1").await.unwrap();
        let err = register(&mut storage, "alice", "pw2").await.unwrap_err();
        assert!(matches!(err, QuizError::DuplicateUsername(_)));
        assert!(err.is_recoverable());
        assert_eq!(storage.count_users_named("alice").await.unwrap(), 1);

        // The first password still works; the rejected one does not.
        assert!(login(&mut storage, "alice", "pw1").await.unwrap().is_some());
        assert!(login(&mut storage, "alice", "pw2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wrong_credentials_return_none() {
        let mut storage = Storage::open_in_memory().await.unwrap();
        register(&mut storage, "alice", "Secret").await.unwrap();

        assert!(login(&mut storage, "alice", "secret").await.unwrap().is_none());
        assert!(login(&mut storage, "Alice", "Secret").await.unwrap().is_none());
        assert!(login(&mut storage, "bob", "Secret").await.unwrap().is_none());
        assert!(login(&mut storage, "", "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn distinct_users_get_distinct_ids() {
        let mut storage = Storage::open_in_memory().await.unwrap();
        let a = register(&mut storage, "alice", "pw").await.unwrap();
        let b = register(&mut storage, "bob", "pw").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(login(&mut storage, "bob", "pw").await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let mut storage = Storage::open_in_memory().await.unwrap();
        let err = register(&mut storage, "   ", "pw").await.unwrap_err();
        assert!(matches!(err, QuizError::EmptyField("username")));
        let err = register(&mut storage, "carol", "").await.unwrap_err();
        assert!(matches!(err, QuizError::EmptyField("password")));
        assert_eq!(storage.count_users_named("carol").await.unwrap(), 0);
    }
}
