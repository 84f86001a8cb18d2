//! # User Repository
//!
//! Registration and credential lookups.
//!
//! Passwords are compared with SQL `=`, which is case-sensitive for TEXT
//! under SQLite's default BINARY collation. No normalization is applied to
//! either field.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use ledger_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by exact username.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets the user whose username AND password both match exactly.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?1 AND password = ?2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a user and returns its id.
    ///
    /// ## Errors
    /// `DbError::DuplicateUsername` if the name is taken.
    pub async fn insert(&self, username: &str, password: &str) -> DbResult<i64> {
        debug!(username = %username, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES (?1, ?2)
            "#,
        )
        .bind(username)
        .bind(password)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let err = DbError::from(e);
            if err.is_unique_violation() {
                DbError::DuplicateUsername {
                    username: username.to_string(),
                }
            } else {
                err
            }
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Number of rows with this exact username (0 or 1).
    pub async fn count_by_username(&self, username: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = db().await;
        let users = db.users();

        let id = users.insert("ana", "x1").await.unwrap();
        let user = users.find_by_username("ana").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "ana");
        assert_eq!(user.password, "x1");

        assert!(users.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_auto_increment() {
        let db = db().await;
        let a = db.users().insert("ana", "x1").await.unwrap();
        let b = db.users().insert("bob", "y2").await.unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = db().await;
        let users = db.users();

        users.insert("ana", "x1").await.unwrap();
        let err = users.insert("ana", "y2").await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateUsername { ref username } if username == "ana"));

        assert_eq!(users.count_by_username("ana").await.unwrap(), 1);
        assert!(users.find_by_credentials("ana", "x1").await.unwrap().is_some());
        assert!(users.find_by_credentials("ana", "y2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_credentials_exact_match() {
        let db = db().await;
        let users = db.users();
        users.insert("Ana", "Secret").await.unwrap();

        assert!(users.find_by_credentials("Ana", "Secret").await.unwrap().is_some());
        assert!(users.find_by_credentials("ana", "Secret").await.unwrap().is_none());
        assert!(users.find_by_credentials("Ana", "secret").await.unwrap().is_none());
        assert!(users.find_by_credentials("Ana ", "Secret").await.unwrap().is_none());
        assert!(users.find_by_credentials("Ana", "").await.unwrap().is_none());
    }
}
