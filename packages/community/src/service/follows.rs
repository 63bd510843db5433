use sea_orm::*;
use tracing::instrument;

use super::{FeedService, insert_unique, new_id};
use crate::aggregation::AggregationEngine;
use crate::entity::follow;
use crate::error::FeedError;
use crate::time::current_time_ns;

impl FeedService {
    /// Follow another member. Self-follows and repeated follows return `false`
    /// and write nothing.
    #[instrument(skip(self))]
    pub async fn follow_user(&self, follower_id: &str, following_id: &str) -> Result<bool, FeedError> {
        if follower_id == following_id {
            tracing::debug!("Rejected self-follow");
            return Ok(false);
        }

        let txn = self.db.begin().await?;
        if AggregationEngine::new(&txn)
            .is_following(follower_id, following_id)
            .await?
        {
            return Ok(false);
        }

        let row = follow::ActiveModel {
            id: Set(new_id()),
            follower_id: Set(follower_id.to_string()),
            following_id: Set(following_id.to_string()),
            created_at: Set(current_time_ns()),
            ..Default::default()
        };

        let created = insert_unique(row, &txn).await?;
        if created {
            txn.commit().await?;
        }
        Ok(created)
    }

    /// Checks a follow or unfollow request before it is made: the target must
    /// be a known member other than the follower.
    pub async fn check_follow_target(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<(), FeedError> {
        if follower_id == following_id {
            return Err(FeedError::ActionProhibited(
                "You cannot follow yourself".into(),
            ));
        }
        if self.identity.get_profile(following_id).await?.is_none() {
            return Err(FeedError::NotFound("User"));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unfollow_user(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<bool, FeedError> {
        if follower_id == following_id {
            return Ok(false);
        }

        let result = follow::Entity::delete_many()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowingId.eq(following_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn is_following(&self, follower_id: &str, following_id: &str) -> Result<bool, FeedError> {
        Ok(AggregationEngine::new(&self.db)
            .is_following(follower_id, following_id)
            .await?)
    }

    /// Returns `(follower_count, following_count)`.
    pub async fn get_follow_counts(&self, user_id: &str) -> Result<(u64, u64), FeedError> {
        Ok(AggregationEngine::new(&self.db)
            .follow_counts(user_id)
            .await?)
    }
}
