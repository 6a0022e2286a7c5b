use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use magshelf_application::VerifyOtpUseCase;
use magshelf_core::Email;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::http::{AppState, ValidJson};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Secret<String>,
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[tracing::instrument(name = "Verify OTP", skip_all)]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::try_from(request.email)?;

    VerifyOtpUseCase::new(&*state.account_store)
        .execute(&email, &request.otp)
        .await?;

    Ok((
        StatusCode::OK,
        MessageResponse::new("OTP verified successfully. You can now log in."),
    ))
}
