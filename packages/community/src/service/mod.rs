//! Feed orchestration: posts, comments, likes, follows and profile views.
//!
//! Multi-statement writes run inside a transaction that commits explicitly
//! and rolls back when dropped on any early return.

mod comments;
mod follows;
mod likes;
mod posts;
mod profiles;

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    SqlErr,
};
use uuid::Uuid;

use crate::error::FeedError;
use crate::identity::IdentityProvider;

pub use posts::PostFilter;

/// Entry point for every feed operation. Construct once at startup and share
/// it; cloning is cheap.
#[derive(Clone)]
pub struct FeedService {
    db: DatabaseConnection,
    identity: Arc<dyn IdentityProvider>,
}

impl FeedService {
    pub fn new(db: DatabaseConnection, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { db, identity }
    }
}

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Insert a row guarded by a unique key. A violation of that key means a
/// concurrent writer stored the same row first, reported as `Ok(false)`.
async fn insert_unique<A, C>(model: A, conn: &C) -> Result<bool, FeedError>
where
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    match <A::Entity as EntityTrait>::insert(model).exec(conn).await {
        Ok(_) => Ok(true),
        Err(e) if is_unique_violation(&e) => {
            tracing::debug!("Unique constraint caught on insert");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Deduplicate while keeping first-seen order.
fn distinct<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
