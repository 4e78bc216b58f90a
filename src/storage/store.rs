use crate::error::Result;
use crate::model::{NewPost, Post, PostId, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Relational store backing the post service.
///
/// Every method is a single statement against the backing store and is
/// atomic on its own; callers never rely on multi-statement transactions.
#[async_trait]
pub trait Store: Send + Sync {
    /// Up to `limit` posts ordered by creation time, newest first. With
    /// `before`, only posts created strictly earlier are returned.
    async fn list_posts(&self, limit: usize, before: Option<DateTime<Utc>>) -> Result<Vec<Post>>;

    async fn find_post(&self, id: PostId) -> Result<Option<Post>>;

    /// Creator of the post, if the post exists.
    async fn post_owner(&self, id: PostId) -> Result<Option<UserId>>;

    async fn insert_post(&self, post: NewPost) -> Result<Post>;

    /// Updates title and text of the post only if `owner` created it.
    /// Returns `None` when no row matched.
    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        title: &str,
        text: &str,
    ) -> Result<Option<Post>>;

    /// Deletes the post only if `owner` created it. Returns the number of
    /// rows removed.
    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<u64>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>>;

    /// All users whose id is in `ids`; unknown ids are skipped.
    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>>;

    async fn create_user(&self, first_name: &str, last_name: &str) -> Result<User>;

    async fn rename_user(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<User>>;
}
