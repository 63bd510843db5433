use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by the feed service.
///
/// `NotFound` deliberately covers both "does not exist" and "not yours" so
/// callers cannot probe for other members' resources.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Action prohibited: {0}")]
    ActionProhibited(String),

    #[error("Consistency fault: {0}")]
    Consistency(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl FeedError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::NotFound(_))
    }
}
