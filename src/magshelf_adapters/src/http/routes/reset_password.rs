use axum::{extract::State, http::StatusCode, response::IntoResponse};
use magshelf_application::ResetPasswordUseCase;
use magshelf_core::{Email, Password};
use secrecy::Secret;
use serde::Deserialize;

use crate::http::{AppState, ValidJson};

use super::{error::ApiError, verify_otp::MessageResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Secret<String>,
    pub otp: String,
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::try_from(request.email)?;
    let new_password = Password::try_from(request.new_password)?;

    ResetPasswordUseCase::new(&*state.account_store, &*state.password_hasher)
        .execute(&email, &request.otp, new_password)
        .await?;

    Ok((StatusCode::OK, MessageResponse::new("Password reset successfully")))
}
