use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::instrument;

use super::{FeedService, insert_unique, new_id};
use crate::aggregation::AggregationEngine;
use crate::entity::{post, post_like};
use crate::error::FeedError;
use crate::time::current_time_ns;

impl FeedService {
    /// Like a post. Returns `false` if the member had already liked it.
    #[instrument(skip(self))]
    pub async fn like_post(&self, post_id: &str, user_id: &str) -> Result<bool, FeedError> {
        let txn = self.db.begin().await?;
        post::Entity::find_by_id(post_id)
            .lock(LockType::Share)
            .one(&txn)
            .await?
            .ok_or(FeedError::NotFound("Post"))?;

        if AggregationEngine::new(&txn).has_liked(post_id, user_id).await? {
            return Ok(false);
        }

        let like = post_like::ActiveModel {
            id: Set(new_id()),
            post_id: Set(post_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(current_time_ns()),
            ..Default::default()
        };

        let created = insert_unique(like, &txn).await?;
        if created {
            txn.commit().await?;
        }
        Ok(created)
    }

    /// Remove a like. Returns `false` if there was nothing to remove.
    #[instrument(skip(self))]
    pub async fn unlike_post(&self, post_id: &str, user_id: &str) -> Result<bool, FeedError> {
        let result = post_like::Entity::delete_many()
            .filter(post_like::Column::PostId.eq(post_id))
            .filter(post_like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn has_liked(&self, post_id: &str, user_id: &str) -> Result<bool, FeedError> {
        Ok(AggregationEngine::new(&self.db)
            .has_liked(post_id, user_id)
            .await?)
    }

    pub async fn like_count(&self, post_id: &str) -> Result<u64, FeedError> {
        Ok(AggregationEngine::new(&self.db).like_count(post_id).await?)
    }
}
