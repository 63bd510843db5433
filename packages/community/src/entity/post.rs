use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A member's post. Timestamps are Unix nanoseconds.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author of the post.
    #[sea_orm(indexed)]
    pub user_id: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Opaque client payloads, stored and returned unchanged.
    #[sea_orm(column_type = "Json", nullable)]
    pub attachments: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub meta: Option<Json>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    #[sea_orm(has_many)]
    pub likes: HasMany<super::post_like::Entity>,

    #[sea_orm(indexed)]
    pub created_at: i64,
    pub updated_at: i64,
}

impl ActiveModelBehavior for ActiveModel {}
