/// Credential store
///
/// Registration, password checks and email-to-id resolution. Passwords are
/// hashed with [`secure_hash`] before they reach the database and are never
/// logged.
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::auth::credentials::{register, verify_password};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = register(&pool, "a@x.com", "password1").await?;
/// assert!(verify_password(&pool, "a@x.com", "password1").await?);
/// assert!(!verify_password(&pool, "a@x.com", "password2").await?);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use tracing::debug;

use super::secure_hash::{offload, secure_hash, secure_verify, HashError};
use crate::db::error::StoreError;
use crate::ids::RecordId;
use crate::models::user::{CreateUser, User};

/// Error type for credential operations
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Registers a new user and returns its identifier
///
/// # Errors
///
/// - `StoreError::DuplicateEmail` if the email already has an account; the
///   existing account is untouched
/// - `StoreError::IdentifierCollision` if the generated id is taken
/// - `HashError` if hashing fails
pub async fn register(pool: &PgPool, email: &str, password: &str) -> Result<RecordId, CredentialError> {
    let plaintext = password.to_string();
    let password_hash = offload(move || secure_hash(&plaintext)).await?;

    let id = User::create(
        pool,
        CreateUser {
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    Ok(id)
}

/// Checks `password` against the account registered under `email`
///
/// # Errors
///
/// - `StoreError::UnknownEmail` if no user has that email
/// - `HashError` if the stored digest is unreadable
pub async fn verify_password(pool: &PgPool, email: &str, password: &str) -> Result<bool, CredentialError> {
    let stored = User::find_password_hash_by_email(pool, email).await?;
    let plaintext = password.to_string();
    let matches = offload(move || secure_verify(&plaintext, &stored)).await?;

    debug!(matches, "Password verification finished");
    Ok(matches)
}

/// Resolves `email` to its user identifier
///
/// # Errors
///
/// Returns `StoreError::UnknownEmail` if no user has that email
pub async fn resolve_user_id(pool: &PgPool, email: &str) -> Result<RecordId, CredentialError> {
    Ok(User::find_id_by_email(pool, email).await?)
}
