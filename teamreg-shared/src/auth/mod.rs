/// Authentication and authorization
///
/// # Modules
///
/// - [`secure_hash`]: The Argon2id `SecureHash` / `SecureVerify` primitive
/// - [`credentials`]: Registration, password checks, email lookup
/// - [`identity`]: Two-part identity tokens (identifier + proof)
/// - [`cookies`]: Carrying identity tokens in HTTP cookies
/// - [`authorization`]: Ownership checks for team-scoped operations
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::auth::{credentials, identity::IdentityToken};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = credentials::register(&pool, "a@x.com", "password1").await?;
/// let token = IdentityToken::issue(&user_id)?;
/// assert_eq!(token.verify()?, user_id);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod cookies;
pub mod credentials;
pub mod identity;
pub mod secure_hash;
