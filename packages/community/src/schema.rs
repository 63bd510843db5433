use sea_orm::{DatabaseConnection, DbErr};

/// Create or migrate every community table (and the `user` table read by
/// [`crate::DbIdentityProvider`]) from the entity definitions.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.get_schema_registry("community::entity::*")
        .sync(db)
        .await
}
