/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, logout and identity lookup
/// - `teams`: Team and team-member endpoints
/// - `documents`: Document upload

pub mod auth;
pub mod documents;
pub mod health;
pub mod teams;
