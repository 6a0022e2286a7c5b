use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use magshelf_application::{
    AddCommentUseCase, ContentError, DeleteMagazineUseCase, ListMagazinesUseCase,
    ListUserMagazinesUseCase, ToggleLikeUseCase, UpdateMagazineUseCase, UploadMagazineUseCase,
};
use magshelf_core::{
    CommentText, CommentView, Magazine, MagazineFilter, MagazineId, MagazinePatch, NewMagazine,
    PersonView,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::Authenticated,
    http::{AppState, ValidJson},
};

use super::{error::ApiError, verify_otp::MessageResponse};

/// Categories as a JSON array or as one comma-separated string, the shape
/// edit forms submit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Categories {
    List(Vec<String>),
    Joined(String),
}

impl Default for Categories {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl From<Categories> for Vec<String> {
    fn from(categories: Categories) -> Self {
        match categories {
            Categories::List(list) => list,
            Categories::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadMagazineRequest {
    pub title: String,
    pub description: String,
    pub categories: Categories,
    pub file_url: String,
    pub cover_image_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMagazineRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Categories>,
    pub file_url: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMagazinesQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MagazineResponse {
    pub message: String,
    pub magazine: Magazine,
}

#[derive(Debug, Serialize)]
pub struct LikesResponse {
    pub likes: Vec<PersonView>,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub message: String,
    pub comments: Vec<CommentView>,
}

fn magazine_id(raw: &str, miss: impl FnOnce() -> ApiError) -> Result<MagazineId, ApiError> {
    MagazineId::parse(raw).map_err(|_| miss())
}

fn not_found() -> ApiError {
    ApiError::NotFound("Magazine not found".to_owned())
}

/// Owner-scoped misses carry an action-specific message but one status.
fn not_found_or_forbidden(action: &str) -> ApiError {
    ApiError::NotFoundOrForbidden(format!(
        "Magazine not found or not authorized to {action}"
    ))
}

fn owner_scoped(action: &'static str) -> impl FnOnce(ContentError) -> ApiError {
    move |error| match error {
        ContentError::NotFoundOrForbidden => not_found_or_forbidden(action),
        e => e.into(),
    }
}

#[tracing::instrument(name = "Upload magazine", skip_all)]
pub async fn upload_magazine(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    ValidJson(request): ValidJson<UploadMagazineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_magazine = NewMagazine::parse(
        &request.title,
        &request.description,
        request.categories.into(),
        &request.file_url,
        &request.cover_image_url,
    )?;

    let magazine = UploadMagazineUseCase::new(&*state.magazine_store)
        .execute(auth.account.id, new_magazine)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MagazineResponse {
            message: "Magazine uploaded successfully".to_owned(),
            magazine,
        }),
    ))
}

#[tracing::instrument(name = "List magazines", skip(state))]
pub async fn list_magazines(
    State(state): State<AppState>,
    Query(query): Query<ListMagazinesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = MagazineFilter::new(query.category, query.search);

    let magazines = ListMagazinesUseCase::new(&*state.magazine_store, &*state.account_store)
        .execute(&filter)
        .await?;

    Ok((StatusCode::OK, Json(magazines)))
}

#[tracing::instrument(name = "List user magazines", skip_all)]
pub async fn user_magazines(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
) -> Result<impl IntoResponse, ApiError> {
    let magazines = ListUserMagazinesUseCase::new(&*state.magazine_store)
        .execute(auth.account.id)
        .await?;

    Ok((StatusCode::OK, Json(magazines)))
}

#[tracing::instrument(name = "Toggle like", skip(state, auth))]
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = magazine_id(&id, not_found)?;

    let likes = ToggleLikeUseCase::new(&*state.magazine_store, &*state.account_store)
        .execute(id, auth.account.id)
        .await?;

    Ok((StatusCode::OK, Json(LikesResponse { likes })))
}

#[tracing::instrument(name = "Add comment", skip(state, auth, request))]
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = magazine_id(&id, not_found)?;
    let text = CommentText::parse(&request.text)?;

    let comments = AddCommentUseCase::new(&*state.magazine_store, &*state.account_store)
        .execute(id, auth.account.id, text)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentsResponse {
            message: "Comment added".to_owned(),
            comments,
        }),
    ))
}

#[tracing::instrument(name = "Update magazine", skip(state, auth, request))]
pub async fn update_magazine(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<UpdateMagazineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = magazine_id(&id, || not_found_or_forbidden("update"))?;
    let patch = MagazinePatch::new(
        request.title,
        request.description,
        request.categories.map(Vec::from),
        request.file_url,
        request.cover_image_url,
    );

    let magazine = UpdateMagazineUseCase::new(&*state.magazine_store)
        .execute(id, auth.account.id, patch)
        .await
        .map_err(owner_scoped("update"))?;

    Ok((
        StatusCode::OK,
        Json(MagazineResponse {
            message: "Magazine updated successfully".to_owned(),
            magazine,
        }),
    ))
}

#[tracing::instrument(name = "Delete magazine", skip(state, auth))]
pub async fn delete_magazine(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = magazine_id(&id, || not_found_or_forbidden("delete"))?;

    DeleteMagazineUseCase::new(&*state.magazine_store)
        .execute(id, auth.account.id)
        .await
        .map_err(owner_scoped("delete"))?;

    Ok((
        StatusCode::OK,
        MessageResponse::new("Magazine deleted successfully"),
    ))
}
