/// Identity token carriage over HTTP cookies
///
/// The token travels as two cookies, `user_id` and `hashed_user_id`. Handlers
/// receive it through the [`CallerToken`] extractor, which never rejects a
/// request: a missing or partial cookie pair simply yields `None`, and the
/// caller is then treated as not logged in.
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::auth::cookies::CallerToken;
///
/// async fn handler(CallerToken(token): CallerToken) -> &'static str {
///     match token {
///         Some(_) => "token presented",
///         None => "anonymous",
///     }
/// }
/// ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use std::convert::Infallible;

use super::identity::IdentityToken;

/// Cookie holding the user identifier
pub const USER_ID_COOKIE: &str = "user_id";

/// Cookie holding the proof-of-identifier
pub const PROOF_COOKIE: &str = "hashed_user_id";

/// Token presented by the caller, if both cookies were sent
#[derive(Debug, Clone)]
pub struct CallerToken(pub Option<IdentityToken>);

#[async_trait]
impl<S> FromRequestParts<S> for CallerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CallerToken(token_from_headers(&parts.headers)))
    }
}

/// Reads the token cookie pair from request headers
pub fn token_from_headers(headers: &HeaderMap) -> Option<IdentityToken> {
    let mut user_id = None;
    let mut proof = None;

    for (name, value) in cookie_pairs(headers) {
        match name {
            USER_ID_COOKIE => user_id = Some(value),
            PROOF_COOKIE => proof = Some(value),
            _ => {}
        }
    }

    Some(IdentityToken::new(user_id?, proof?))
}

fn cookie_pairs(headers: &HeaderMap) -> impl Iterator<Item = (&str, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((name.trim(), value.to_string()))
        })
}

fn cookie_attributes(secure: bool) -> &'static str {
    if secure {
        "Path=/; HttpOnly; SameSite=Lax; Secure"
    } else {
        "Path=/; HttpOnly; SameSite=Lax"
    }
}

/// `Set-Cookie` values that hand `token` to the caller
///
/// Returns `None` only if a token part contains bytes not allowed in a header.
pub fn issue_cookies(token: &IdentityToken, secure: bool) -> Option<[HeaderValue; 2]> {
    let attrs = cookie_attributes(secure);

    let user_id = HeaderValue::from_str(&format!("{}={}; {}", USER_ID_COOKIE, token.user_id, attrs)).ok()?;
    let proof = HeaderValue::from_str(&format!("{}={}; {}", PROOF_COOKIE, token.proof, attrs)).ok()?;

    Some([user_id, proof])
}

/// `Set-Cookie` values that remove both token cookies
pub fn clear_cookies(secure: bool) -> [HeaderValue; 2] {
    let attrs = cookie_attributes(secure);

    [USER_ID_COOKIE, PROOF_COOKIE].map(|name| {
        HeaderValue::from_str(&format!("{}=; Max-Age=0; {}", name, attrs))
            .unwrap_or_else(|_| HeaderValue::from_static(""))
    })
}
