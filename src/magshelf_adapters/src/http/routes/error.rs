use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use magshelf_application::{
    ContentError, ForgotPasswordError, LoginError, RegisterError, ResetPasswordError,
    StoreUploadError, VerifyOtpError,
};
use magshelf_core::{AccountError, AccountStoreError, MagazineError, SessionStoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please log in.";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    AuthenticationError(String),

    #[error("Unauthorized. Please log in.")]
    AuthorizationError,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    NotFoundOrForbidden(String),

    #[error("{0}")]
    UpstreamError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ApiError::ValidationError(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationError(_) | ApiError::AuthorizationError => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) | ApiError::NotFoundOrForbidden(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamError(ref e) => {
                tracing::error!(error = %e, "request failed upstream");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            message: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::ValidationError(error.body_text())
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        ApiError::ValidationError(error.to_string())
    }
}

impl From<MagazineError> for ApiError {
    fn from(error: MagazineError) -> Self {
        ApiError::ValidationError(error.to_string())
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => ApiError::NotFound(error.to_string()),
            AccountStoreError::AccountAlreadyExists => ApiError::Conflict(error.to_string()),
            AccountStoreError::UnexpectedError(e) => ApiError::UpstreamError(e),
        }
    }
}

impl From<SessionStoreError> for ApiError {
    fn from(error: SessionStoreError) -> Self {
        ApiError::UpstreamError(error.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::UnexpectedError(e) => ApiError::UpstreamError(e),
            e => {
                tracing::debug!(reason = %e, "rejected unauthenticated request");
                ApiError::AuthorizationError
            }
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::AlreadyRegistered => ApiError::Conflict(error.to_string()),
            RegisterError::AccountStoreError(e) => e.into(),
            RegisterError::PasswordHasherError(e) => ApiError::UpstreamError(e.to_string()),
            RegisterError::EmailError(e) => ApiError::UpstreamError(e),
        }
    }
}

impl From<VerifyOtpError> for ApiError {
    fn from(error: VerifyOtpError) -> Self {
        match error {
            VerifyOtpError::AccountNotFound | VerifyOtpError::CodeMismatchOrExpired => {
                ApiError::ValidationError(error.to_string())
            }
            VerifyOtpError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::AccountNotFound
            | LoginError::NotVerified
            | LoginError::IncorrectPassword => ApiError::AuthenticationError(error.to_string()),
            LoginError::AccountStoreError(e) => e.into(),
            LoginError::PasswordHasherError(e) => ApiError::UpstreamError(e.to_string()),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::AccountNotFound => ApiError::NotFound(error.to_string()),
            ForgotPasswordError::AccountStoreError(e) => e.into(),
            ForgotPasswordError::EmailError(e) => ApiError::UpstreamError(e),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::AccountNotFound => ApiError::NotFound(error.to_string()),
            ResetPasswordError::CodeMismatchOrExpired => {
                ApiError::ValidationError(error.to_string())
            }
            ResetPasswordError::AccountStoreError(e) => e.into(),
            ResetPasswordError::PasswordHasherError(e) => ApiError::UpstreamError(e.to_string()),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(error: ContentError) -> Self {
        match error {
            ContentError::MagazineNotFound => ApiError::NotFound(error.to_string()),
            ContentError::NotFoundOrForbidden => ApiError::NotFoundOrForbidden(error.to_string()),
            ContentError::Invalid(e) => e.into(),
            ContentError::MagazineStoreError(e) => ApiError::UpstreamError(e.to_string()),
            ContentError::AccountStoreError(e) => ApiError::UpstreamError(e.to_string()),
        }
    }
}

impl From<StoreUploadError> for ApiError {
    fn from(error: StoreUploadError) -> Self {
        match error {
            StoreUploadError::Invalid(e) => ApiError::ValidationError(e.to_string()),
            StoreUploadError::Storage(e) => ApiError::UpstreamError(e.to_string()),
        }
    }
}
