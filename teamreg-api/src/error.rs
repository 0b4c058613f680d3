/// Error handling for the API server
///
/// Expected outcomes (wrong password, team full, not the owner, ...) are not
/// errors here: handlers report them as flags in a `200 OK` body. `ApiError`
/// covers what is left, mostly store connectivity and hashing failures, and
/// turns it into a JSON error response without leaking details.
///
/// # Example
///
/// ```
/// use teamreg_api::error::{ApiError, ApiResult};
///
/// fn load() -> ApiResult<u32> {
///     Err(ApiError::InternalError("pool timed out".to_string()))
/// }
///
/// assert!(load().is_err());
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use teamreg_shared::{
    auth::{credentials::CredentialError, secure_hash::HashError},
    db::error::StoreError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Internal server error (500)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "internal_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Store errors that reach this conversion were not handled as flags by the
/// handler, so they are unexpected
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(format!("Store operation failed: {}", err))
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::InternalError(format!("Credential operation failed: {}", err))
    }
}

impl From<HashError> for ApiError {
    fn from(err: HashError) -> Self {
        ApiError::InternalError(format!("Hash operation failed: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(format!("Document storage failed: {}", err))
    }
}
