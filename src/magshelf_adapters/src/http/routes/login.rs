use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use magshelf_application::LoginUseCase;
use magshelf_core::{AccountProfile, Email, Password};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{create_session_cookie, generate_auth_token},
    http::{AppState, ValidJson},
};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<Secret<String>>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: AccountProfile,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::ValidationError(
            "Please provide email and password".to_owned(),
        ));
    };
    let email = Email::try_from(email)?;
    let password = Password::try_from(password)?;

    let account = LoginUseCase::new(&*state.account_store, &*state.password_hasher)
        .execute(&email, &password)
        .await?;
    let user = account.profile();

    let session = state
        .session_store
        .create(user.id, state.config.session_ttl())
        .await?;
    let jar = jar.add(create_session_cookie(
        &session.id,
        &state.config.session_cookie,
    )?);

    let token = generate_auth_token(&user, &state.config.jwt)?;

    Ok((
        jar,
        (
            StatusCode::OK,
            Json(LoginResponse {
                message: "Login successful".to_owned(),
                token,
                user,
            }),
        ),
    ))
}
