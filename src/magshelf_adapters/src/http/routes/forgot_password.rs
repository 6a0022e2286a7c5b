use axum::{extract::State, http::StatusCode, response::IntoResponse};
use magshelf_application::ForgotPasswordUseCase;
use magshelf_core::Email;
use secrecy::Secret;
use serde::Deserialize;

use crate::http::{AppState, ValidJson};

use super::{error::ApiError, verify_otp::MessageResponse};

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::try_from(request.email)?;

    ForgotPasswordUseCase::new(&*state.account_store, &*state.email_client)
        .execute(&email)
        .await?;

    Ok((StatusCode::OK, MessageResponse::new("OTP sent to your email")))
}
