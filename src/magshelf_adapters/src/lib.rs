//! Port implementations and the axum surface for magshelf.
//!
//! Stores come in an in-memory flavour (tests, local runs) and a
//! Postgres / Redis flavour (production). The `http` module holds the
//! routes; router assembly lives in `magshelf_service`.

pub mod auth;
pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod oauth;
pub mod persistence;
pub mod storage;

pub use auth::{AuthError, Authenticated, RequestAuthenticator};
pub use config::Settings;
pub use http::{Adapters, ApiError, AppConfig, AppState};
