use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::instrument;

use super::{FeedService, distinct, new_id};
use crate::entity::{comment, post};
use crate::error::FeedError;
use crate::forms::CommentForm;
use crate::time::current_time_ns;
use crate::view::{CommentView, assemble_comment};

impl FeedService {
    /// Add a comment to an existing post.
    #[instrument(skip(self, form))]
    pub async fn create_comment(
        &self,
        post_id: &str,
        form: CommentForm,
        author_id: &str,
    ) -> Result<CommentView, FeedError> {
        form.validate()?;

        let txn = self.db.begin().await?;
        // Shared lock keeps the post from being deleted underneath the insert.
        post::Entity::find_by_id(post_id)
            .lock(LockType::Share)
            .one(&txn)
            .await?
            .ok_or(FeedError::NotFound("Post"))?;

        let now = current_time_ns();
        let new_comment = comment::ActiveModel {
            id: Set(new_id()),
            post_id: Set(post_id.to_string()),
            user_id: Set(author_id.to_string()),
            content: Set(form.content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = new_comment.insert(&txn).await?;
        txn.commit().await?;

        let authors = self.identity.get_profiles(&[author_id.to_string()]).await?;
        Ok(assemble_comment(model, &authors))
    }

    /// Comments on a post in thread order (oldest first).
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: &str,
        viewer_id: &str,
    ) -> Result<Vec<CommentView>, FeedError> {
        let comments = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?;

        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids = distinct(comments.iter().map(|c| &c.user_id));
        let authors = self.identity.get_profiles(&author_ids).await?;

        Ok(comments
            .into_iter()
            .map(|c| assemble_comment(c, &authors))
            .collect())
    }

    /// Delete a comment written by `author_id`. The post's author has no
    /// special rights over other members' comments.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: &str, author_id: &str) -> Result<bool, FeedError> {
        let result = comment::Entity::delete_many()
            .filter(comment::Column::Id.eq(comment_id))
            .filter(comment::Column::UserId.eq(author_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Like [`delete_comment`](Self::delete_comment), addressed through its
    /// post. A missing post is `NotFound`; a comment on another post is left
    /// alone and yields `false`.
    #[instrument(skip(self))]
    pub async fn delete_post_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        author_id: &str,
    ) -> Result<bool, FeedError> {
        if !self.post_exists(post_id).await? {
            return Err(FeedError::NotFound("Post"));
        }

        let result = comment::Entity::delete_many()
            .filter(comment::Column::Id.eq(comment_id))
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::UserId.eq(author_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
