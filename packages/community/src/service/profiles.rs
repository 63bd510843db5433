use tracing::instrument;

use super::FeedService;
use crate::aggregation::AggregationEngine;
use crate::error::FeedError;
use crate::view::{UserProfileView, assemble_profile};

impl FeedService {
    /// Profile card of `user_id` as seen by `viewer_id`.
    #[instrument(skip(self))]
    pub async fn get_user_profile(
        &self,
        user_id: &str,
        viewer_id: &str,
    ) -> Result<UserProfileView, FeedError> {
        let user = self
            .identity
            .get_profile(user_id)
            .await?
            .ok_or(FeedError::NotFound("User"))?;

        let aggregates = AggregationEngine::new(&self.db)
            .profile_aggregates(user_id, Some(viewer_id))
            .await?;

        Ok(assemble_profile(user, aggregates))
    }
}
