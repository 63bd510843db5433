use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// At most one row per (post, user); the unique key is what makes liking
/// idempotent under concurrent requests.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_post_like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique_key = "post_user")]
    pub post_id: String,
    #[sea_orm(unique_key = "post_user", indexed)]
    pub user_id: String,

    #[sea_orm(belongs_to, from = "post_id", to = "id")]
    pub post: HasOne<super::post::Entity>,

    pub created_at: i64,
}

impl ActiveModelBehavior for ActiveModel {}
