use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::Member;
use crate::models::community::{FollowResponse, UserPageQuery, UserPageResponse};
use crate::models::shared::page_window;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/community/users/{id}",
    tag = "Users",
    operation_id = "getUserPage",
    summary = "A member's profile and posts",
    params(
        ("id" = String, Path, description = "User ID"),
        UserPageQuery,
    ),
    responses(
        (status = 200, description = "Profile and post page", body = UserPageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member, query), fields(viewer = %member.id()))]
pub async fn get_user_page(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserPageQuery>,
) -> Result<Json<UserPageResponse>, AppError> {
    let profile = state.feed.get_user_profile(&id, member.id()).await?;
    let (skip, limit) = page_window(query.page, query.limit, &state.config.community);
    let posts = state
        .feed
        .list_posts(member.id(), Some(&id), skip, limit)
        .await?;
    Ok(Json(UserPageResponse { profile, posts }))
}

#[utoipa::path(
    post,
    path = "/api/v1/community/users/{id}/follow",
    tag = "Users",
    operation_id = "followUser",
    summary = "Follow a member",
    description = "Idempotent: following someone you already follow is a no-op.",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Follow state", body = FollowResponse),
        (status = 400, description = "Cannot follow yourself (ACTION_PROHIBITED)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(follower = %member.id()))]
pub async fn follow_user(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FollowResponse>, AppError> {
    state.feed.check_follow_target(member.id(), &id).await?;
    state.feed.follow_user(member.id(), &id).await?;
    let (follower_count, _) = state.feed.get_follow_counts(&id).await?;
    Ok(Json(FollowResponse {
        following: true,
        follower_count,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/community/users/{id}/follow",
    tag = "Users",
    operation_id = "unfollowUser",
    summary = "Stop following a member",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Follow state", body = FollowResponse),
        (status = 400, description = "Cannot unfollow yourself (ACTION_PROHIBITED)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED, FEATURE_DISABLED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, member), fields(follower = %member.id()))]
pub async fn unfollow_user(
    member: Member,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FollowResponse>, AppError> {
    state.feed.check_follow_target(member.id(), &id).await?;
    state.feed.unfollow_user(member.id(), &id).await?;
    let (follower_count, _) = state.feed.get_follow_counts(&id).await?;
    Ok(Json(FollowResponse {
        following: false,
        follower_count,
    }))
}
