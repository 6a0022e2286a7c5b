pub mod jwt;
pub mod request_authenticator;
pub mod session_cookie;

use thiserror::Error;

pub use jwt::{Claims, JwtConfig, generate_auth_token};
pub use request_authenticator::{Authenticated, RequestAuthenticator};
pub use session_cookie::{
    SessionCookieConfig, create_oauth_state_cookie, create_session_cookie,
    oauth_state_removal_cookie, session_id_from, session_removal_cookie,
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,
    #[error("Session expired")]
    SessionExpired,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}
