//! # Teamreg Shared Library
//!
//! This crate contains the authentication model and the data-access layer
//! used by the teamreg API server.
//!
//! ## Module Organization
//!
//! - `ids`: Server-side identifier generation
//! - `auth`: Credential hashing, identity tokens, cookie carriage, ownership checks
//! - `db`: Connection pool, migrations, store error taxonomy
//! - `models`: Users, teams, team members, documents

pub mod auth;
pub mod db;
pub mod ids;
pub mod models;

/// Current version of the teamreg shared library, reported by `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

