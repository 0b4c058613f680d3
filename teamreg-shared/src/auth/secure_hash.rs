/// Salted adaptive hashing using Argon2id
///
/// One primitive, two uses: password storage ([`credentials`](super::credentials))
/// and identity-token proofs ([`identity`](super::identity)). Both go through
/// [`secure_hash`] / [`secure_verify`] so the cost parameters stay in one place.
///
/// # Parameters
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Salt**: 16 random bytes from the OS RNG, embedded in the digest
/// - **Output**: 32-byte hash, PHC string encoded
///
/// Verification only accepts digests carrying exactly these parameters. The
/// digest may come from a caller (identity proofs), so its cost fields are
/// never trusted.
///
/// # Example
///
/// ```
/// use teamreg_shared::auth::secure_hash::{secure_hash, secure_verify};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let digest = secure_hash("super_secret_password_123")?;
///
/// assert!(secure_verify("super_secret_password_123", &digest)?);
/// assert!(!secure_verify("wrong_password", &digest)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, ParamsBuilder, Version,
};

/// Error type for hashing operations
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Failed to produce a digest
    #[error("Failed to hash value: {0}")]
    HashFailed(String),

    /// Failed to run verification
    #[error("Failed to verify value: {0}")]
    VerifyFailed(String),

    /// Digest is not a parsable PHC string
    #[error("Invalid digest format: {0}")]
    InvalidDigest(String),

    /// Digest names an algorithm, version or cost this service never issues
    #[error("Unexpected digest parameters: {0}")]
    UnexpectedParameters(String),

    /// The blocking task running the hash did not complete
    #[error("Hashing task failed: {0}")]
    TaskFailed(String),
}

fn issuance_params() -> Result<Params, HashError> {
    ParamsBuilder::new()
        .m_cost(65536) // 64 MB
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| HashError::HashFailed(format!("Invalid parameters: {}", e)))
}

fn hasher() -> Result<Argon2<'static>, HashError> {
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, issuance_params()?))
}

/// Rejects digests whose algorithm, version or cost differ from issuance
fn check_parameters(parsed: &PasswordHash<'_>) -> Result<(), HashError> {
    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return Err(HashError::UnexpectedParameters(format!(
            "algorithm {}",
            parsed.algorithm
        )));
    }

    if parsed.version != Some(Version::V0x13 as u32) {
        return Err(HashError::UnexpectedParameters(format!(
            "version {:?}",
            parsed.version
        )));
    }

    let presented = Params::try_from(parsed)
        .map_err(|e| HashError::UnexpectedParameters(format!("unreadable cost: {}", e)))?;
    let expected = issuance_params()?;

    if presented.m_cost() != expected.m_cost()
        || presented.t_cost() != expected.t_cost()
        || presented.p_cost() != expected.p_cost()
        || parsed.hash.as_ref().map(|output| output.len()) != expected.output_len()
    {
        return Err(HashError::UnexpectedParameters(format!(
            "m={},t={},p={}",
            presented.m_cost(),
            presented.t_cost(),
            presented.p_cost()
        )));
    }

    Ok(())
}

/// Hashes `value` with a fresh random salt
///
/// Returns a PHC string such as
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// Two calls with the same input produce different digests.
///
/// # Errors
///
/// Returns `HashError::HashFailed` if the hasher rejects its input
pub fn secure_hash(value: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);

    let digest = hasher()?
        .hash_password(value.as_bytes(), &salt)
        .map_err(|e| HashError::HashFailed(format!("Hash generation failed: {}", e)))?;

    Ok(digest.to_string())
}

/// Checks `value` against a digest produced by [`secure_hash`]
///
/// The salt is read from the digest; the cost must match the issuance
/// parameters before any hashing happens. Comparison of the recomputed
/// output is constant-time.
///
/// # Returns
///
/// `Ok(true)` on match, `Ok(false)` on mismatch
///
/// # Errors
///
/// - `HashError::InvalidDigest` if `digest` is not a PHC string
/// - `HashError::UnexpectedParameters` if it names another algorithm,
///   version or cost
/// - `HashError::VerifyFailed` for any other verifier failure
pub fn secure_verify(value: &str, digest: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|e| HashError::InvalidDigest(format!("Failed to parse digest: {}", e)))?;

    check_parameters(&parsed)?;

    match hasher()?.verify_password(value.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashError::VerifyFailed(format!("Verification failed: {}", e))),
    }
}

/// Runs hashing work on the blocking pool
///
/// Argon2 holds a thread for the full cost of a hash, so async callers go
/// through here instead of hashing on a runtime worker.
pub async fn offload<T, F>(work: F) -> Result<T, HashError>
where
    F: FnOnce() -> Result<T, HashError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| HashError::TaskFailed(e.to_string()))?
}
