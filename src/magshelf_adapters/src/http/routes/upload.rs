use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use magshelf_application::StoreUploadUseCase;
use serde::{Deserialize, Serialize};

use crate::http::AppState;

use super::error::ApiError;

pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_url: String,
}

#[tracing::instrument(name = "Upload file", skip_all)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field.bytes().await?;

        let file_url = StoreUploadUseCase::new(&*state.file_storage)
            .execute(&file_name, &content_type, bytes.to_vec())
            .await?;

        return Ok((StatusCode::OK, Json(UploadResponse { file_url })));
    }

    Err(ApiError::ValidationError("No file uploaded".to_owned()))
}
