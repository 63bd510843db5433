use serde::Serialize;

use crate::config::CommunityConfig;

/// Generic acknowledgement body for delete endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatusResponse {
    #[schema(example = true)]
    pub status: bool,
}

/// Translate 1-based `page`/`limit` query values into a `(skip, limit)` window.
///
/// `limit` falls back to the configured default and is clamped to
/// `[1, max_page_size]`; `page` below 1 is treated as 1. The skip never
/// exceeds `i64::MAX`, the largest offset the database binds.
pub fn page_window(page: Option<u64>, limit: Option<u64>, config: &CommunityConfig) -> (u64, u64) {
    let max = config.max_page_size.max(1);
    let limit = limit.unwrap_or(config.default_page_size).clamp(1, max);
    let page = page.unwrap_or(1).max(1);
    let skip = (page - 1).saturating_mul(limit).min(i64::MAX as u64);
    (skip, limit)
}
