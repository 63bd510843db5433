use std::collections::{HashMap, HashSet};

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

use crate::entity::{comment, follow, post_like};

/// Derived counts and viewer-relative flags for a batch of posts.
#[derive(Debug, Clone, Default)]
pub struct PostAggregates {
    pub like_counts: HashMap<String, u64>,
    pub comment_counts: HashMap<String, u64>,
    /// Posts (from the batch) the viewer has liked.
    pub viewer_likes: HashSet<String>,
    /// Authors (of posts in the batch) the viewer follows.
    pub viewer_following: HashSet<String>,
}

impl PostAggregates {
    pub fn like_count(&self, post_id: &str) -> u64 {
        self.like_counts.get(post_id).copied().unwrap_or(0)
    }

    pub fn comment_count(&self, post_id: &str) -> u64 {
        self.comment_counts.get(post_id).copied().unwrap_or(0)
    }

    pub fn viewer_has_liked(&self, post_id: &str) -> bool {
        self.viewer_likes.contains(post_id)
    }

    pub fn viewer_follows(&self, author_id: &str) -> bool {
        self.viewer_following.contains(author_id)
    }
}

/// Follow counts of one member, plus whether the viewer follows them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileAggregates {
    pub follower_count: u64,
    pub following_count: u64,
    pub viewer_is_following: bool,
}

/// Read-only aggregation over likes, comments and follows.
///
/// Batch reads use a fixed number of grouped queries however many posts are
/// requested: two count queries, plus two more when a viewer is given.
pub struct AggregationEngine<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AggregationEngine<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Aggregate a batch of posts. `author_ids` are the authors of those posts;
    /// the follow lookup is restricted to them.
    pub async fn post_aggregates(
        &self,
        post_ids: &[String],
        author_ids: &[String],
        viewer_id: Option<&str>,
    ) -> Result<PostAggregates, DbErr> {
        if post_ids.is_empty() {
            return Ok(PostAggregates::default());
        }

        let like_counts: Vec<(String, i64)> = post_like::Entity::find()
            .select_only()
            .column(post_like::Column::PostId)
            .column_as(post_like::Column::Id.count(), "count")
            .filter(post_like::Column::PostId.is_in(post_ids.to_vec()))
            .group_by(post_like::Column::PostId)
            .into_tuple()
            .all(self.conn)
            .await?;

        let comment_counts: Vec<(String, i64)> = comment::Entity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(comment::Column::Id.count(), "count")
            .filter(comment::Column::PostId.is_in(post_ids.to_vec()))
            .group_by(comment::Column::PostId)
            .into_tuple()
            .all(self.conn)
            .await?;

        let mut aggregates = PostAggregates {
            like_counts: into_count_map(like_counts),
            comment_counts: into_count_map(comment_counts),
            ..Default::default()
        };

        let Some(viewer_id) = viewer_id else {
            return Ok(aggregates);
        };

        let liked: Vec<String> = post_like::Entity::find()
            .select_only()
            .column(post_like::Column::PostId)
            .filter(post_like::Column::UserId.eq(viewer_id))
            .filter(post_like::Column::PostId.is_in(post_ids.to_vec()))
            .into_tuple()
            .all(self.conn)
            .await?;
        aggregates.viewer_likes = liked.into_iter().collect();

        if !author_ids.is_empty() {
            let following: Vec<String> = follow::Entity::find()
                .select_only()
                .column(follow::Column::FollowingId)
                .filter(follow::Column::FollowerId.eq(viewer_id))
                .filter(follow::Column::FollowingId.is_in(author_ids.to_vec()))
                .into_tuple()
                .all(self.conn)
                .await?;
            aggregates.viewer_following = following.into_iter().collect();
        }

        Ok(aggregates)
    }

    /// Follow counts for `user_id`, and whether `viewer_id` follows them.
    pub async fn profile_aggregates(
        &self,
        user_id: &str,
        viewer_id: Option<&str>,
    ) -> Result<ProfileAggregates, DbErr> {
        let (follower_count, following_count) = self.follow_counts(user_id).await?;
        let viewer_is_following = match viewer_id {
            Some(viewer_id) if viewer_id != user_id => {
                self.is_following(viewer_id, user_id).await?
            }
            _ => false,
        };

        Ok(ProfileAggregates {
            follower_count,
            following_count,
            viewer_is_following,
        })
    }

    /// Returns `(follower_count, following_count)`.
    pub async fn follow_counts(&self, user_id: &str) -> Result<(u64, u64), DbErr> {
        let followers = follow::Entity::find()
            .filter(follow::Column::FollowingId.eq(user_id))
            .count(self.conn)
            .await?;
        let following = follow::Entity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .count(self.conn)
            .await?;

        Ok((followers, following))
    }

    pub async fn is_following(&self, follower_id: &str, following_id: &str) -> Result<bool, DbErr> {
        let count = follow::Entity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowingId.eq(following_id))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn like_count(&self, post_id: &str) -> Result<u64, DbErr> {
        post_like::Entity::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .count(self.conn)
            .await
    }

    pub async fn has_liked(&self, post_id: &str, user_id: &str) -> Result<bool, DbErr> {
        let count = post_like::Entity::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .filter(post_like::Column::UserId.eq(user_id))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }
}

fn into_count_map(rows: Vec<(String, i64)>) -> HashMap<String, u64> {
    rows.into_iter()
        .map(|(id, count)| (id, count.max(0) as u64))
        .collect()
}
