use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::auth::Authenticated;

#[tracing::instrument(name = "Current user", skip_all)]
pub async fn current_user(Extension(auth): Extension<Authenticated>) -> impl IntoResponse {
    (StatusCode::OK, Json(auth.account))
}
