use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Roles allowed to use the community feature.
pub const VERIFIED_ROLES: &[&str] = &["user", "admin"];

/// Identity record. Owned by the account system; this crate only reads it.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// One of: pending, user, admin
    pub role: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub profile_image_url: Option<String>,

    pub created_at: i64,
}

impl ActiveModelBehavior for ActiveModel {}
