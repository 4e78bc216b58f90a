//! Post operations independent of any transport.
//!
//! Reads fail only on store errors or malformed input; absence is `None`.
//! Writes never return store errors to the caller: every failure is turned
//! into a list of [`FieldError`]s.

use crate::error::{PostboardError, Result};
use crate::model::{NewPost, Post, PostId, User, UserId};
use crate::storage::Store;
use crate::validation;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Hard ceiling on the number of posts returned by one page.
pub const MAX_PAGE_SIZE: usize = 50;

/// Field name used for failures not tied to a specific input.
pub const GENERAL_FIELD: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self::new(GENERAL_FIELD, message)
    }
}

pub type WriteResult<T> = std::result::Result<T, Vec<FieldError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Post),
    NotFound,
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Forbidden,
}

/// Page size actually used for a requested `limit`: at least 1, at most
/// [`MAX_PAGE_SIZE`].
pub fn effective_limit(limit: i32) -> usize {
    limit.clamp(1, MAX_PAGE_SIZE as i32) as usize
}

/// Decodes a cursor: milliseconds since the Unix epoch as a decimal string.
pub fn parse_cursor(cursor: &str) -> Result<DateTime<Utc>> {
    let millis = cursor
        .trim()
        .parse::<i64>()
        .map_err(|_| PostboardError::InvalidCursor(cursor.to_string()))?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| PostboardError::InvalidCursor(cursor.to_string()))
}

/// Cursor that continues a listing after `post`.
pub fn cursor_for(post: &Post) -> String {
    post.created_at.timestamp_millis().to_string()
}

fn store_failure(err: PostboardError) -> Vec<FieldError> {
    vec![FieldError::general(err.to_string())]
}

fn validation_message(err: PostboardError) -> String {
    match err {
        PostboardError::Validation(message) => message,
        other => other.to_string(),
    }
}

fn validate_input(input: &PostInput) -> WriteResult<()> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_title(&input.title) {
        errors.push(FieldError::new("title", validation_message(e)));
    }
    if let Err(e) = validation::validate_text(&input.text) {
        errors.push(FieldError::new("text", validation_message(e)));
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Newest posts first, one page at a time.
    ///
    /// Fetches one row more than the page size; its presence is what sets
    /// `has_more`.
    pub async fn list_posts(&self, limit: i32, cursor: Option<&str>) -> Result<PostPage> {
        let page_size = effective_limit(limit);
        let before = cursor.map(parse_cursor).transpose()?;

        let mut posts = self.store.list_posts(page_size + 1, before).await?;
        let has_more = posts.len() == page_size + 1;
        posts.truncate(page_size);

        tracing::debug!(page_size, returned = posts.len(), has_more, "listed posts");
        Ok(PostPage { posts, has_more })
    }

    pub async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        self.store.find_post(id).await
    }

    pub async fn create_post(&self, caller: UserId, input: PostInput) -> WriteResult<Post> {
        let user = match self.store.find_user(caller).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!(caller, "create rejected: caller is not a known user");
                return Err(vec![FieldError::general("not authenticated")]);
            }
            Err(e) => {
                tracing::warn!(caller, error = %e, "create failed looking up caller");
                return Err(store_failure(e));
            }
        };
        validate_input(&input)?;

        let new_post = NewPost::new(input.title, input.text, &user);
        match self.store.insert_post(new_post).await {
            Ok(post) => {
                tracing::info!(id = post.id, creator = caller, "post created");
                Ok(post)
            }
            Err(e) => {
                tracing::warn!(caller, error = %e, "create failed");
                Err(store_failure(e))
            }
        }
    }

    pub async fn update_post(
        &self,
        caller: UserId,
        id: PostId,
        input: PostInput,
    ) -> WriteResult<UpdateOutcome> {
        validate_input(&input)?;

        let updated = self
            .store
            .update_post(id, caller, &input.title, &input.text)
            .await
            .map_err(|e| {
                tracing::warn!(id, caller, error = %e, "update failed");
                store_failure(e)
            })?;

        match updated {
            Some(post) => {
                tracing::info!(id, caller, "post updated");
                Ok(UpdateOutcome::Updated(post))
            }
            None => match self.classify_miss(id).await? {
                Miss::NotFound => Ok(UpdateOutcome::NotFound),
                Miss::Forbidden => {
                    tracing::info!(id, caller, "update rejected: not the creator");
                    Ok(UpdateOutcome::Forbidden)
                }
            },
        }
    }

    pub async fn delete_post(&self, caller: UserId, id: PostId) -> WriteResult<DeleteOutcome> {
        let removed = self.store.delete_post(id, caller).await.map_err(|e| {
            tracing::warn!(id, caller, error = %e, "delete failed");
            store_failure(e)
        })?;

        if removed > 0 {
            tracing::info!(id, caller, "post deleted");
            return Ok(DeleteOutcome::Deleted);
        }
        match self.classify_miss(id).await? {
            Miss::NotFound => Ok(DeleteOutcome::NotFound),
            Miss::Forbidden => {
                tracing::info!(id, caller, "delete rejected: not the creator");
                Ok(DeleteOutcome::Forbidden)
            }
        }
    }

    /// Batch lookup backing the `creator` relation.
    pub async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        self.store.find_users(ids).await
    }

    /// Explains why an ownership-scoped write matched no row.
    async fn classify_miss(&self, id: PostId) -> WriteResult<Miss> {
        match self.store.post_owner(id).await {
            Ok(Some(_)) => Ok(Miss::Forbidden),
            Ok(None) => Ok(Miss::NotFound),
            Err(e) => Err(store_failure(e)),
        }
    }
}

enum Miss {
    NotFound,
    Forbidden,
}
