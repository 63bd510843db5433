use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entity::user;
use crate::error::FeedError;
use crate::view::AuthorProfile;

/// Resolves member ids to public profiles.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up several members at once. Unknown ids are simply absent from
    /// the returned map.
    async fn get_profiles(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, AuthorProfile>, FeedError>;

    /// Look up a single member.
    async fn get_profile(&self, user_id: &str) -> Result<Option<AuthorProfile>, FeedError> {
        let mut profiles = self.get_profiles(&[user_id.to_string()]).await?;
        Ok(profiles.remove(user_id))
    }
}

/// Identity provider backed by the `user` table.
#[derive(Clone)]
pub struct DbIdentityProvider {
    db: DatabaseConnection,
}

impl DbIdentityProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityProvider for DbIdentityProvider {
    async fn get_profiles(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, AuthorProfile>, FeedError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids.to_vec()))
            .all(&self.db)
            .await?;

        Ok(users
            .into_iter()
            .map(|u| (u.id.clone(), AuthorProfile::from(u)))
            .collect())
    }
}
