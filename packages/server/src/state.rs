use std::sync::Arc;

use community::{FeedService, IdentityProvider};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub feed: FeedService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        identity: Arc<dyn IdentityProvider>,
        config: AppConfig,
    ) -> Self {
        Self {
            feed: FeedService::new(db, identity),
            config,
        }
    }
}
