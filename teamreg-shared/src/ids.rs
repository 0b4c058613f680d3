/// Record identifiers
///
/// Every record (user, team, team member, document) is keyed by a 6-digit
/// numeric string drawn uniformly from 100000..=999999 using the OS CSPRNG.
/// There is no central counter and no retry on collision: a collision reaches
/// the store as a primary-key violation and is reported as
/// [`StoreError::IdentifierCollision`](crate::db::error::StoreError) (or the
/// per-table error documented on each insert).
///
/// # Example
///
/// ```
/// use teamreg_shared::ids::RecordId;
///
/// let id = RecordId::generate();
/// assert_eq!(id.as_str().len(), 6);
/// ```

use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest identifier that can be generated
pub const MIN_ID: u32 = 100_000;

/// Largest identifier that can be generated
pub const MAX_ID: u32 = 999_999;

/// Opaque numeric identifier stored as text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Draws a fresh random identifier
    pub fn generate() -> Self {
        let value = OsRng.gen_range(MIN_ID..=MAX_ID);
        Self(value.to_string())
    }

    /// Wraps a caller-supplied identifier without validation
    ///
    /// Identifiers arriving from callers are opaque; an unknown one simply
    /// fails the lookup it is used in.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
