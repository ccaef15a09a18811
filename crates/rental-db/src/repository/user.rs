//! # User Repository
//!
//! Registration and login lookup. Sessions live in the web layer; this store
//! only answers "who is this id" and "do these credentials match".
//!
//! ## Registration
//! ```text
//! NewUser { full_name, email, password, license_no }
//!      │
//!      ▼
//! validate_new_user()  ──► email trimmed + lowercased
//!      │
//!      ▼
//! argon2 hash (random salt, PHC string)
//!      │
//!      ▼
//! INSERT INTO users ... ──► UNIQUE(email) ──► DbError::UniqueViolation
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rental_core::validation::{normalize_email, validate_new_user};
use rental_core::{Credentials, NewUser, User};

const USER_COLUMNS: &str = "id, full_name, email, password_hash, license_no, created_at";

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

    /// Registers a user.
    ///
    /// ## Returns
    /// * `Ok(User)` - Stored user (the hash is never serialized)
    /// * `Err(DbError::Invalid)` - A field failed validation
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn create(&self, new_user: &NewUser) -> DbResult<User> {
        let email = validate_new_user(new_user)?;
        let password_hash = hash_password(&new_user.password)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            full_name: new_user.full_name.trim().to_string(),
            email,
            password_hash,
            license_no: new_user.license_no.trim().to_string(),
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, license_no, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.license_no)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                info!(user_id = %user.id, "User registered");
                Ok(user)
            }
            Err(e) => match DbError::from(e) {
                err if err.is_unique_violation_on("users.email") => {
                    Err(DbError::duplicate("email", user.email))
                }
                err => Err(err),
            },
        }
    }

    /// Looks up a user by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    /// Checks a login attempt.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller:
    /// both return `Ok(None)`.
    pub async fn authenticate(&self, credentials: &Credentials) -> DbResult<Option<User>> {
        let Ok(email) = normalize_email(&credentials.email) else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        match user {
            Some(user) if verify_password(&credentials.password, &user.password_hash) => {
                debug!(user_id = %user.id, "Login accepted");
                Ok(Some(user))
            }
            _ => {
                debug!("Login rejected");
                Ok(None)
            }
        }
    }
}

/// Hashes a password for storage as a PHC string.
fn hash_password(password: &str) -> DbResult<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Credential(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{memory_db, new_user};

    fn login(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = memory_db().await;
        let user = db
            .users()
            .create(&new_user("  Ada Lovelace ", " Ada@Example.COM "))
            .await
            .unwrap();

        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert_ne!(user.password_hash, "correct horse");
        assert!(user.password_hash.starts_with("$argon2"));

        let fetched = db.users().get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "ada@example.com");
        assert_eq!(fetched.license_no, "DL-123456");
    }

    #[tokio::test]
    async fn test_duplicate_email_case_insensitive() {
        let db = memory_db().await;
        db.users()
            .create(&new_user("Ada", "ada@example.com"))
            .await
            .unwrap();

        let err = db
            .users()
            .create(&new_user("Other Ada", "ADA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "email"));
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let db = memory_db().await;
        let mut user = new_user("Ada", "ada@example.com");
        user.password = "short".to_string();

        let err = db.users().create(&user).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = memory_db().await;
        let user = db
            .users()
            .create(&new_user("Ada", "ada@example.com"))
            .await
            .unwrap();

        let found = db
            .users()
            .authenticate(&login("ADA@example.com", "correct horse"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);

        assert!(db
            .users()
            .authenticate(&login("ada@example.com", "wrong horse"))
            .await
            .unwrap()
            .is_none());
        assert!(db
            .users()
            .authenticate(&login("nobody@example.com", "correct horse"))
            .await
            .unwrap()
            .is_none());
        assert!(db
            .users()
            .authenticate(&login("not-an-email", "correct horse"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let db = memory_db().await;
        assert!(db.users().get_by_id("nope").await.unwrap().is_none());
    }
}
