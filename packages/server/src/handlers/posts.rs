use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use community::{PostForm, PostPage, PostUpdateForm, PostView};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::Member;
use crate::extractors::json::AppJson;
use crate::models::community::{FeedQuery, PostDetailResponse};
use crate::models::shared::{StatusResponse, page_window};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/community/posts",
    tag = "Posts",
    operation_id = "listPosts",
    summary = "List the feed",
    description = "Newest-first page of posts with like/comment counts and the caller's like and follow flags. `total` counts every matching post regardless of paging.",
    params(FeedQuery),
    responses(
        (status = 200, description = "Feed page", body = PostPage),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member, query), fields(viewer = %member.id()))]
pub async fn list_posts(
    member: Member,
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<PostPage>, AppError> {
    let (skip, limit) = page_window(query.page, query.limit, &state.config.community);
    let page = state
        .feed
        .list_posts(member.id(), query.user_id.as_deref(), skip, limit)
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/v1/community/posts",
    tag = "Posts",
    operation_id = "createPost",
    summary = "Publish a post",
    request_body = PostForm,
    responses(
        (status = 201, description = "Post created", body = PostView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member, form), fields(author = %member.id()))]
pub async fn create_post(
    member: Member,
    State(state): State<AppState>,
    AppJson(form): AppJson<PostForm>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.feed.create_post(form, member.id()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/api/v1/community/posts/{id}",
    tag = "Posts",
    operation_id = "getPost",
    summary = "Get a post with its comments",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post and comment thread", body = PostDetailResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(viewer = %member.id()))]
pub async fn get_post(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let post = state.feed.get_post(&id, member.id()).await?;
    let comments = state.feed.list_comments(&id, member.id()).await?;
    Ok(Json(PostDetailResponse { post, comments }))
}

#[utoipa::path(
    post,
    path = "/api/v1/community/posts/{id}/update",
    tag = "Posts",
    operation_id = "updatePost",
    summary = "Edit one of your posts",
    description = "Only fields present in the body change. `null` clears `title`, `attachments` or `meta`.",
    params(("id" = String, Path, description = "Post ID")),
    request_body = PostUpdateForm,
    responses(
        (status = 200, description = "Updated post", body = PostView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "No such post owned by the caller (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member, form), fields(author = %member.id()))]
pub async fn update_post(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(form): AppJson<PostUpdateForm>,
) -> Result<Json<PostView>, AppError> {
    let view = state.feed.update_post(&id, form, member.id()).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/v1/community/posts/{id}/delete",
    tag = "Posts",
    operation_id = "deletePost",
    summary = "Delete one of your posts",
    description = "Removes the post together with its comments and likes.",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = StatusResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "No such post owned by the caller (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(author = %member.id()))]
pub async fn delete_post(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    if !state.feed.delete_post(&id, member.id()).await? {
        return Err(AppError::NotFound("Post not found".into()));
    }
    Ok(Json(StatusResponse { status: true }))
}
