use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{Authenticated, session_removal_cookie},
    http::AppState,
};

use super::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    state.session_store.destroy(&auth.session_id).await?;

    let jar = jar.add(session_removal_cookie());

    Ok((
        jar,
        (
            StatusCode::OK,
            Json(LogoutResponse {
                success: true,
                message: "User logged out successfully".to_owned(),
            }),
        ),
    ))
}
