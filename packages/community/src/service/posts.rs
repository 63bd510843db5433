use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::instrument;

use super::{FeedService, distinct, new_id};
use crate::aggregation::AggregationEngine;
use crate::entity::{comment, post, post_like};
use crate::error::FeedError;
use crate::forms::{PostForm, PostUpdateForm};
use crate::time::{current_time_ns, next_time_ns};
use crate::view::{PostPage, PostView, assemble_post};

/// Selection of posts for a feed read.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Only posts written by this member.
    pub author_id: Option<String>,
    /// Only these posts.
    pub post_ids: Option<Vec<String>>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Largest offset or limit the store accepts; both bind as signed 64-bit.
const MAX_WINDOW: u64 = i64::MAX as u64;

impl FeedService {
    /// Publish a post and return it as the author sees it.
    #[instrument(skip(self, form))]
    pub async fn create_post(&self, form: PostForm, author_id: &str) -> Result<PostView, FeedError> {
        form.validate()?;

        let now = current_time_ns();
        let new_post = post::ActiveModel {
            id: Set(new_id()),
            user_id: Set(author_id.to_string()),
            title: Set(form.title),
            content: Set(form.content),
            attachments: Set(form.attachments),
            meta: Set(form.meta),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = new_post.insert(&self.db).await?;

        self.reload_post(&model.id, author_id, "creation").await
    }

    /// Apply the fields present in `form` to a post owned by `author_id`.
    #[instrument(skip(self, form))]
    pub async fn update_post(
        &self,
        post_id: &str,
        form: PostUpdateForm,
        author_id: &str,
    ) -> Result<PostView, FeedError> {
        form.validate()?;

        let txn = self.db.begin().await?;
        let existing = find_owned_post_for_update(&txn, post_id, author_id)
            .await?
            .ok_or(FeedError::NotFound("Post"))?;

        let previous_update = existing.updated_at;
        let mut active: post::ActiveModel = existing.into();

        if let Some(title) = form.title {
            active.title = Set(title);
        }
        if let Some(content) = form.content {
            active.content = Set(content);
        }
        if let Some(attachments) = form.attachments {
            active.attachments = Set(attachments);
        }
        if let Some(meta) = form.meta {
            active.meta = Set(meta);
        }
        active.updated_at = Set(next_time_ns(previous_update));

        active.update(&txn).await?;
        txn.commit().await?;

        self.reload_post(post_id, author_id, "update").await
    }

    /// Delete a post owned by `author_id` together with its comments and likes.
    ///
    /// Returns `false` when the post does not exist or belongs to someone else.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: &str, author_id: &str) -> Result<bool, FeedError> {
        let txn = self.db.begin().await?;
        if find_owned_post_for_update(&txn, post_id, author_id)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        comment::Entity::delete_many()
            .filter(comment::Column::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        post_like::Entity::delete_many()
            .filter(post_like::Column::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        post::Entity::delete_by_id(post_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Newest-first page of the feed, optionally restricted to one author.
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        viewer_id: &str,
        author_id: Option<&str>,
        skip: u64,
        limit: u64,
    ) -> Result<PostPage, FeedError> {
        self.query_posts(
            Some(viewer_id),
            PostFilter {
                author_id: author_id.map(str::to_string),
                skip: Some(skip),
                limit: Some(limit),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: &str, viewer_id: &str) -> Result<PostView, FeedError> {
        self.find_post_view(post_id, Some(viewer_id))
            .await?
            .ok_or(FeedError::NotFound("Post"))
    }

    /// Whether a post exists, regardless of who wrote it.
    pub async fn post_exists(&self, post_id: &str) -> Result<bool, FeedError> {
        let count = post::Entity::find_by_id(post_id).count(&self.db).await?;
        Ok(count > 0)
    }

    /// Run a feed read: filter, order newest first (id as tie-breaker),
    /// paginate, then enrich the page with aggregates and author profiles.
    pub async fn query_posts(
        &self,
        viewer_id: Option<&str>,
        filter: PostFilter,
    ) -> Result<PostPage, FeedError> {
        let mut select = post::Entity::find();

        if let Some(post_ids) = filter.post_ids {
            select = select.filter(post::Column::Id.is_in(post_ids));
        }
        if let Some(author_id) = filter.author_id {
            select = select.filter(post::Column::UserId.eq(author_id));
        }

        let total = select.clone().count(&self.db).await?;

        let posts = select
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(filter.skip.map(|skip| Ord::min(skip, MAX_WINDOW)))
            .limit(filter.limit.map(|limit| Ord::min(limit, MAX_WINDOW)))
            .all(&self.db)
            .await?;

        if posts.is_empty() {
            return Ok(PostPage {
                posts: Vec::new(),
                total,
            });
        }

        let post_ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
        let author_ids = distinct(posts.iter().map(|p| &p.user_id));

        let aggregates = AggregationEngine::new(&self.db)
            .post_aggregates(&post_ids, &author_ids, viewer_id)
            .await?;
        let authors = self.identity.get_profiles(&author_ids).await?;

        let posts = posts
            .into_iter()
            .map(|p| assemble_post(p, &aggregates, &authors))
            .collect();

        Ok(PostPage { posts, total })
    }

    async fn find_post_view(
        &self,
        post_id: &str,
        viewer_id: Option<&str>,
    ) -> Result<Option<PostView>, FeedError> {
        let page = self
            .query_posts(
                viewer_id,
                PostFilter {
                    post_ids: Some(vec![post_id.to_string()]),
                    ..Default::default()
                },
            )
            .await?;
        Ok(page.posts.into_iter().next())
    }

    /// Re-read a post just written so the caller gets authoritative counts.
    async fn reload_post(
        &self,
        post_id: &str,
        viewer_id: &str,
        after: &str,
    ) -> Result<PostView, FeedError> {
        match self.find_post_view(post_id, Some(viewer_id)).await? {
            Some(view) => Ok(view),
            None => {
                tracing::error!(post_id, "Failed to reload community post after {after}");
                Err(FeedError::Consistency(format!(
                    "post {post_id} missing after {after}"
                )))
            }
        }
    }
}

async fn find_owned_post_for_update<C: ConnectionTrait>(
    conn: &C,
    post_id: &str,
    author_id: &str,
) -> Result<Option<post::Model>, DbErr> {
    post::Entity::find_by_id(post_id)
        .filter(post::Column::UserId.eq(author_id))
        .lock(LockType::Update)
        .one(conn)
        .await
}
