use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use magshelf_core::SessionId;

use super::AuthError;
use crate::config::{OAUTH_STATE_COOKIE_NAME, OAUTH_STATE_TTL_SECONDS, SESSION_COOKIE_NAME};

#[derive(Debug, Clone, Copy)]
pub struct SessionCookieConfig {
    pub secure: bool,
    pub ttl_in_seconds: i64,
}

pub fn create_session_cookie(
    session_id: &SessionId,
    config: &SessionCookieConfig,
) -> Result<Cookie<'static>, AuthError> {
    create_cookie(
        SESSION_COOKIE_NAME,
        session_id.as_str(),
        config.ttl_in_seconds,
        config.secure,
    )
}

pub fn session_removal_cookie() -> Cookie<'static> {
    removal_cookie(SESSION_COOKIE_NAME)
}

pub fn session_id_from(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(SessionId::from_raw)
}

/// Short-lived cookie binding the OAuth `state` parameter to the browser.
pub fn create_oauth_state_cookie(state: &str, secure: bool) -> Result<Cookie<'static>, AuthError> {
    create_cookie(OAUTH_STATE_COOKIE_NAME, state, OAUTH_STATE_TTL_SECONDS, secure)
}

pub fn oauth_state_removal_cookie() -> Cookie<'static> {
    removal_cookie(OAUTH_STATE_COOKIE_NAME)
}

fn create_cookie(
    name: &str,
    value: &str,
    max_age_seconds: i64,
    secure: bool,
) -> Result<Cookie<'static>, AuthError> {
    let mut cookie = Cookie::parse(format!("{name}={value}; Max-Age={max_age_seconds}"))
        .map_err(|e| AuthError::UnexpectedError(e.to_string()))?;
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    Ok(cookie)
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
