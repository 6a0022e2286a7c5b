use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use magshelf_application::{RegisterOutcome, RegisterUseCase};
use magshelf_core::{Email, Password};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::http::{AppState, ValidJson};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub email: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(
        &*state.account_store,
        &*state.password_hasher,
        &*state.email_client,
    );
    let outcome = use_case
        .execute(email.clone(), password, request.name)
        .await?;

    let message = match outcome {
        RegisterOutcome::CodeSent => "OTP sent to your email. Please verify.",
        RegisterOutcome::CodeResent => "A new OTP has been sent to your email.",
        RegisterOutcome::CodeAlreadySent => "OTP already sent. Please verify your email.",
    };

    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            message: message.to_owned(),
            email: email.as_ref().expose_secret().clone(),
        }),
    ))
}
