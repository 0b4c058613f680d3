/// Identity tokens
///
/// After registration or login a caller receives a two-part token:
/// the user identifier and a *proof*, which is the identifier run through
/// [`secure_hash`]. Every privileged call presents both parts and the server
/// checks them with [`secure_verify`]. Nothing is stored server-side.
///
/// # Security
///
/// The proof is a capability check, not a keyed signature. There is no server
/// secret: anyone able to run Argon2id over a known identifier can mint a
/// valid proof offline. The random salt only prevents precomputed tables.
/// Replacing this with a keyed MAC would change the trust model and is left
/// as a deliberate decision for deployment review.
///
/// # Example
///
/// ```
/// use teamreg_shared::auth::identity::IdentityToken;
/// use teamreg_shared::ids::RecordId;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = RecordId::new("123456");
/// let token = IdentityToken::issue(&user_id)?;
///
/// assert_eq!(token.verify()?, user_id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::secure_hash::{secure_hash, secure_verify, HashError};
use crate::ids::RecordId;

/// Token verification failed
///
/// Carries no detail on purpose: malformed, mismatched and empty tokens
/// are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Authentication failure")]
pub struct AuthenticationFailure;

/// Identifier plus proof-of-identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityToken {
    /// User identifier as presented by the caller
    pub user_id: String,

    /// Argon2id PHC digest of `user_id`
    pub proof: String,
}

impl IdentityToken {
    /// Assembles a token from caller-supplied parts
    pub fn new(user_id: impl Into<String>, proof: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            proof: proof.into(),
        }
    }

    /// Issues a fresh token for `user_id`
    ///
    /// # Errors
    ///
    /// Returns `HashError` if the hashing primitive fails
    pub fn issue(user_id: &RecordId) -> Result<Self, HashError> {
        let proof = secure_hash(user_id.as_str())?;
        debug!(user_id = %user_id, "Issued identity token");

        Ok(Self {
            user_id: user_id.to_string(),
            proof,
        })
    }

    /// Verifies the proof against the identifier
    ///
    /// Fails closed with [`AuthenticationFailure`] on empty fields, on an
    /// unparsable proof or one whose cost differs from issuance, and on a
    /// mismatch. This hashes synchronously; async callers go through
    /// [`authenticate`](super::authorization::authenticate).
    pub fn verify(&self) -> Result<RecordId, AuthenticationFailure> {
        if self.user_id.is_empty() || self.proof.is_empty() {
            return Err(AuthenticationFailure);
        }

        match secure_verify(&self.user_id, &self.proof) {
            Ok(true) => Ok(RecordId::new(self.user_id.clone())),
            Ok(false) => {
                debug!(user_id = %self.user_id, "Identity proof mismatch");
                Err(AuthenticationFailure)
            }
            Err(e) => {
                debug!(user_id = %self.user_id, error = %e, "Rejected identity proof");
                Err(AuthenticationFailure)
            }
        }
    }
}
