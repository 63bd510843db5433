use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_follow")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique_key = "follower_following")]
    pub follower_id: String,
    #[sea_orm(unique_key = "follower_following", indexed)]
    pub following_id: String,

    pub created_at: i64,
}

impl ActiveModelBehavior for ActiveModel {}
