use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::aggregation::{PostAggregates, ProfileAggregates};
use crate::entity::{comment, post, user};

/// Public part of a member's identity, embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct AuthorProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PostView {
    pub id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub attachments: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub meta: Option<Value>,
    pub created_at: i64,
    pub updated_at: i64,

    pub like_count: u64,
    pub comment_count: u64,
    pub viewer_has_liked: bool,
    /// `None` when the author is no longer known to the identity provider.
    pub author: Option<AuthorProfile>,
    pub viewer_is_following_author: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CommentView {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub author: Option<AuthorProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct UserProfileView {
    pub user: AuthorProfile,
    pub follower_count: u64,
    pub following_count: u64,
    pub viewer_is_following: bool,
}

/// One page of the feed. `total` counts every matching post, ignoring the limit.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PostPage {
    pub posts: Vec<PostView>,
    pub total: u64,
}

impl From<user::Model> for AuthorProfile {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            role: m.role,
            profile_image_url: m.profile_image_url,
        }
    }
}

pub fn assemble_post(
    post: post::Model,
    aggregates: &PostAggregates,
    authors: &HashMap<String, AuthorProfile>,
) -> PostView {
    PostView {
        like_count: aggregates.like_count(&post.id),
        comment_count: aggregates.comment_count(&post.id),
        viewer_has_liked: aggregates.viewer_has_liked(&post.id),
        author: authors.get(&post.user_id).cloned(),
        viewer_is_following_author: aggregates.viewer_follows(&post.user_id),
        id: post.id,
        user_id: post.user_id,
        title: post.title,
        content: post.content,
        attachments: post.attachments,
        meta: post.meta,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn assemble_comment(
    comment: comment::Model,
    authors: &HashMap<String, AuthorProfile>,
) -> CommentView {
    CommentView {
        author: authors.get(&comment.user_id).cloned(),
        id: comment.id,
        post_id: comment.post_id,
        user_id: comment.user_id,
        content: comment.content,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

pub fn assemble_profile(user: AuthorProfile, aggregates: ProfileAggregates) -> UserProfileView {
    UserProfileView {
        user,
        follower_count: aggregates.follower_count,
        following_count: aggregates.following_count,
        viewer_is_following: aggregates.viewer_is_following,
    }
}
