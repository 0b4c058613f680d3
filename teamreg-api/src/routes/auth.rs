/// Authentication endpoints
///
/// - `POST /api/register` - Create an account and receive identity cookies
/// - `POST /api/login` - Check credentials and receive identity cookies
/// - `POST /api/logout` - Drop identity cookies
/// - `POST /api/get-id` - Report the identifier the cookies prove
///
/// All outcomes a client can act on are reported as flags in a `200 OK`
/// body; only unexpected failures become error responses.

use crate::{app::AppState, error::{ApiError, ApiResult}};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use teamreg_shared::{
    auth::{
        authorization::authenticate,
        cookies::{clear_cookies, issue_cookies, CallerToken},
        credentials::{self, CredentialError},
        identity::IdentityToken,
        secure_hash::offload,
    },
    db::error::StoreError,
    ids::RecordId,
};
use tracing::{info, warn};
use validator::Validate;

/// Identifier reported when there is none
pub const NO_ID: &str = "-1";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub id: String,
    pub success: bool,
    pub email_unique: bool,
    pub password_acceptable: bool,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    pub email_correct: bool,
    pub password_correct: bool,
}

/// Logout response
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Get-id response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetIdResponse {
    pub id: String,
    pub success: bool,
}

/// Issues a token for `user_id` and packs it into `Set-Cookie` headers
async fn token_cookie_headers(user_id: &RecordId, secure: bool) -> ApiResult<HeaderMap> {
    let user_id = user_id.clone();
    let token = offload(move || IdentityToken::issue(&user_id)).await?;

    let cookies = issue_cookies(&token, secure)
        .ok_or_else(|| ApiError::InternalError("Identity token is not header-safe".to_string()))?;

    let mut headers = HeaderMap::new();
    for cookie in cookies {
        headers.append(header::SET_COOKIE, cookie);
    }
    Ok(headers)
}

/// Register a new user
///
/// ```text
/// POST /api/register
/// { "email": "a@x.com", "password": "password1" }
/// ```
///
/// - Password shorter than 8 characters: `password_acceptable=false`, nothing stored
/// - Email already registered: `email_unique=false`
/// - Success: `id` set, identity cookies issued
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(HeaderMap, Json<RegisterResponse>)> {
    if req.validate().is_err() {
        return Ok((
            HeaderMap::new(),
            Json(RegisterResponse {
                id: NO_ID.to_string(),
                success: false,
                email_unique: true,
                password_acceptable: false,
            }),
        ));
    }

    let user_id = match credentials::register(&state.db, &req.email, &req.password).await {
        Ok(user_id) => user_id,
        Err(CredentialError::Store(StoreError::DuplicateEmail)) => {
            return Ok((
                HeaderMap::new(),
                Json(RegisterResponse {
                    id: NO_ID.to_string(),
                    success: false,
                    email_unique: false,
                    password_acceptable: true,
                }),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let headers = token_cookie_headers(&user_id, state.secure_cookies()).await?;

    Ok((
        headers,
        Json(RegisterResponse {
            id: user_id.into_inner(),
            success: true,
            email_unique: true,
            password_acceptable: true,
        }),
    ))
}

/// Log in with email and password
///
/// ```text
/// POST /api/login
/// { "email": "a@x.com", "password": "password1" }
/// ```
///
/// - Unknown email: `email_correct=false`
/// - Wrong password: `password_correct=false`
/// - Success: identity cookies issued
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<LoginResponse>)> {
    let denied = |email_correct: bool, password_correct: bool| -> ApiResult<(HeaderMap, Json<LoginResponse>)> {
        Ok((
            HeaderMap::new(),
            Json(LoginResponse {
                success: false,
                email_correct,
                password_correct,
            }),
        ))
    };

    match credentials::verify_password(&state.db, &req.email, &req.password).await {
        Ok(true) => {}
        Ok(false) => {
            warn!("Login rejected: wrong password");
            return denied(true, false);
        }
        Err(CredentialError::Store(StoreError::UnknownEmail)) => {
            warn!("Login rejected: unknown email");
            return denied(false, true);
        }
        Err(e) => return Err(e.into()),
    }

    let user_id = credentials::resolve_user_id(&state.db, &req.email).await?;
    let headers = token_cookie_headers(&user_id, state.secure_cookies()).await?;

    info!(user_id = %user_id, "User logged in");
    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            email_correct: true,
            password_correct: true,
        }),
    ))
}

/// Log out by expiring both identity cookies
///
/// Tokens are not tracked server-side, so a copied token stays valid.
pub async fn logout(State(state): State<AppState>) -> (HeaderMap, Json<LogoutResponse>) {
    let mut headers = HeaderMap::new();
    for cookie in clear_cookies(state.secure_cookies()) {
        headers.append(header::SET_COOKIE, cookie);
    }

    (headers, Json(LogoutResponse { success: true }))
}

/// Report the identifier proven by the caller's cookies
pub async fn get_id(CallerToken(token): CallerToken) -> Json<GetIdResponse> {
    match authenticate(token.as_ref()).await {
        Ok(user_id) => Json(GetIdResponse {
            id: user_id.into_inner(),
            success: true,
        }),
        Err(_) => Json(GetIdResponse {
            id: NO_ID.to_string(),
            success: false,
        }),
    }
}
