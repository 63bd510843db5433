use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::FeedError;

/// Payload for a new post.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct PostForm {
    pub title: Option<String>,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub attachments: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub meta: Option<Value>,
}

/// Partial update of a post. Absent fields are left untouched; for the
/// nullable columns an explicit `null` clears the stored value.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct PostUpdateForm {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Object>)]
    pub attachments: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Object>)]
    pub meta: Option<Option<Value>>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CommentForm {
    pub content: String,
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Post and comment bodies must contain something other than whitespace.
pub fn validate_content(content: &str) -> Result<(), FeedError> {
    if content.trim().is_empty() {
        return Err(FeedError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

impl PostForm {
    pub fn validate(&self) -> Result<(), FeedError> {
        validate_content(&self.content)
    }
}

impl PostUpdateForm {
    pub fn validate(&self) -> Result<(), FeedError> {
        match self.content {
            Some(ref content) => validate_content(content),
            None => Ok(()),
        }
    }
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), FeedError> {
        validate_content(&self.content)
    }
}
