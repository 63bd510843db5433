use community::{CommentView, PostPage, PostView, UserProfileView};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the feed.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Page number (1-based, default 1).
    pub page: Option<u64>,
    /// Posts per page (default 20, max 50).
    pub limit: Option<u64>,
    /// Restrict the feed to posts by this user.
    pub user_id: Option<String>,
}

/// Query parameters for a user's page.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserPageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// A post together with its comment thread.
#[derive(Serialize, ToSchema)]
pub struct PostDetailResponse {
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

/// Profile card plus the user's own posts.
#[derive(Serialize, ToSchema)]
pub struct UserPageResponse {
    pub profile: UserProfileView,
    pub posts: PostPage,
}

/// Like state of a post after a like or unlike request.
#[derive(Serialize, ToSchema)]
pub struct LikeResponse {
    /// Whether the caller now likes the post.
    pub liked: bool,
    pub like_count: u64,
}

/// Follow state after a follow or unfollow request.
#[derive(Serialize, ToSchema)]
pub struct FollowResponse {
    /// Whether the caller now follows the target.
    pub following: bool,
    /// Followers of the target user.
    pub follower_count: u64,
}
