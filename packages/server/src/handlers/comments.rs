use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use community::{CommentForm, CommentView};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::Member;
use crate::extractors::json::AppJson;
use crate::models::shared::StatusResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/community/posts/{id}/comments",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List comments on a post",
    description = "Oldest first.",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Comment thread", body = Vec<CommentView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(viewer = %member.id()))]
pub async fn list_comments(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentView>>, AppError> {
    if !state.feed.post_exists(&id).await? {
        return Err(AppError::NotFound("Post not found".into()));
    }
    let comments = state.feed.list_comments(&id, member.id()).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/v1/community/posts/{id}/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a post",
    params(("id" = String, Path, description = "Post ID")),
    request_body = CommentForm,
    responses(
        (status = 201, description = "Comment created", body = CommentView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member, form), fields(author = %member.id()))]
pub async fn create_comment(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(form): AppJson<CommentForm>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.feed.create_comment(&id, form, member.id()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/community/posts/{id}/comments/{comment_id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete one of your comments",
    params(
        ("id" = String, Path, description = "Post ID"),
        ("comment_id" = String, Path, description = "Comment ID"),
    ),
    responses(
        (status = 200, description = "Comment deleted", body = StatusResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "Post missing, or no such comment by the caller on it (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(author = %member.id()))]
pub async fn delete_comment(
    member: Member,
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, AppError> {
    if !state
        .feed
        .delete_post_comment(&post_id, &comment_id, member.id())
        .await?
    {
        return Err(AppError::NotFound("Comment not found".into()));
    }
    Ok(Json(StatusResponse { status: true }))
}
