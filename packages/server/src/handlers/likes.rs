use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::Member;
use crate::models::community::LikeResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/community/posts/{id}/like",
    tag = "Likes",
    operation_id = "likePost",
    summary = "Like a post",
    description = "Idempotent: liking an already-liked post leaves the count unchanged.",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Like state", body = LikeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(user = %member.id()))]
pub async fn like_post(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikeResponse>, AppError> {
    let created = state.feed.like_post(&id, member.id()).await?;
    if !created {
        tracing::debug!(post_id = %id, "post already liked");
    }
    let like_count = state.feed.like_count(&id).await?;
    Ok(Json(LikeResponse {
        liked: true,
        like_count,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/community/posts/{id}/like",
    tag = "Likes",
    operation_id = "unlikePost",
    summary = "Remove your like from a post",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Like state", body = LikeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(user = %member.id()))]
pub async fn unlike_post(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikeResponse>, AppError> {
    if !state.feed.post_exists(&id).await? {
        return Err(AppError::NotFound("Post not found".into()));
    }
    state.feed.unlike_post(&id, member.id()).await?;
    let like_count = state.feed.like_count(&id).await?;
    Ok(Json(LikeResponse {
        liked: false,
        like_count,
    }))
}
