/// User model and database operations
///
/// Users are created on registration and never updated or deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id TEXT NOT NULL,
///     email TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     CONSTRAINT users_pkey PRIMARY KEY (id),
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let id = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let same = User::find_id_by_email(&pool, "user@example.com").await?;
/// assert_eq!(id, same);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::db::error::{constraints, StoreError, Violation, ViolationKind};
use crate::ids::RecordId;

/// User account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// 6-digit identifier
    pub id: RecordId,

    /// Unique email address
    pub email: String,

    /// Argon2id digest; never serialized to callers
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,

    /// Argon2id digest (NOT the plaintext password)
    pub password_hash: String,
}

impl User {
    /// Inserts a user under a freshly generated identifier
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateEmail` if the email is taken
    /// - `StoreError::IdentifierCollision` if the generated id is taken
    /// - `StoreError::Database` for anything else
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<RecordId, StoreError> {
        let id = RecordId::generate();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&id)
        .bind(&data.email)
        .bind(&data.password_hash)
        .execute(pool)
        .await;

        match result {
            Ok(_) => {
                info!(user_id = %id, "Registered user");
                Ok(id)
            }
            Err(e) => Err(classify_insert_error(e)),
        }
    }

    /// Returns the stored password digest for `email`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownEmail` if no user has that email
    pub async fn find_password_hash_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<String, StoreError> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(pool)
                .await?;

        hash.ok_or(StoreError::UnknownEmail)
    }

    /// Resolves `email` to its user identifier
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownEmail` if no user has that email
    pub async fn find_id_by_email(pool: &PgPool, email: &str) -> Result<RecordId, StoreError> {
        let id: Option<RecordId> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        debug!(found = id.is_some(), "Resolved user id by email");
        id.ok_or(StoreError::UnknownEmail)
    }
}

fn classify_insert_error(err: sqlx::Error) -> StoreError {
    match Violation::from_sqlx(&err) {
        Some(v) if v.kind == ViolationKind::Unique && v.is_constraint(constraints::USERS_EMAIL_KEY) => {
            warn!("Registration rejected: email already registered");
            StoreError::DuplicateEmail
        }
        Some(v) if v.kind == ViolationKind::Unique && v.is_constraint(constraints::USERS_PKEY) => {
            warn!("Generated user id collided with an existing user");
            StoreError::IdentifierCollision("users".to_string())
        }
        _ => StoreError::Database(err),
    }
}
