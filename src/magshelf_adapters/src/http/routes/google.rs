use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use magshelf_application::{GoogleLoginError, GoogleLoginUseCase};
use magshelf_core::{IdentityProviderError, SessionStoreError};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::{
        AuthError, create_oauth_state_cookie, create_session_cookie, oauth_state_removal_cookie,
    },
    config::OAUTH_STATE_COOKIE_NAME,
    http::AppState,
};

use super::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
enum GoogleCallbackError {
    #[error("Google sign-in was cancelled: {0}")]
    Denied(String),
    #[error("OAuth state mismatch")]
    StateMismatch,
    #[error("Missing authorization code")]
    MissingCode,
    #[error(transparent)]
    Provider(#[from] IdentityProviderError),
    #[error(transparent)]
    Login(#[from] GoogleLoginError),
    #[error(transparent)]
    Session(#[from] SessionStoreError),
    #[error(transparent)]
    Cookie(#[from] AuthError),
}

#[tracing::instrument(name = "Google login", skip_all)]
pub async fn google_login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let csrf_state = Uuid::new_v4().simple().to_string();
    let jar = jar.add(create_oauth_state_cookie(
        &csrf_state,
        state.config.session_cookie.secure,
    )?);

    let authorization_url = state.identity_provider.authorization_url(&csrf_state);
    Ok((jar, Redirect::to(&authorization_url)))
}

/// Finishes the handshake and always answers with a redirect to the frontend.
#[tracing::instrument(name = "Google callback", skip_all)]
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<GoogleCallbackQuery>,
) -> impl IntoResponse {
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned());
    let jar = jar.add(oauth_state_removal_cookie());
    let client_url = &state.config.client_url;

    match complete_google_login(&state, expected_state, query).await {
        Ok(session_cookie) => (
            jar.add(session_cookie),
            Redirect::to(&format!("{client_url}/dashboard")),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "google login failed");
            (jar, Redirect::to(&format!("{client_url}/login")))
        }
    }
}

async fn complete_google_login(
    state: &AppState,
    expected_state: Option<String>,
    query: GoogleCallbackQuery,
) -> Result<Cookie<'static>, GoogleCallbackError> {
    if let Some(error) = query.error {
        return Err(GoogleCallbackError::Denied(error));
    }
    match (expected_state, query.state) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return Err(GoogleCallbackError::StateMismatch),
    }
    let code = query.code.ok_or(GoogleCallbackError::MissingCode)?;

    let profile = state.identity_provider.exchange_code(&code).await?;
    let account = GoogleLoginUseCase::new(&*state.account_store)
        .execute(profile)
        .await?;

    let session = state
        .session_store
        .create(account.id(), state.config.session_ttl())
        .await?;

    Ok(create_session_cookie(
        &session.id,
        &state.config.session_cookie,
    )?)
}
