use super::store::Store;
use crate::error::Result;
use crate::model::{NewPost, Post, PostId, User, UserId, now_millis};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    posts: BTreeMap<PostId, Post>,
    users: BTreeMap<UserId, User>,
    next_post_id: PostId,
    next_user_id: UserId,
    /// Creation time handed to the most recent insert
    last_created: Option<DateTime<Utc>>,
}

impl Tables {
    /// Creation timestamps are strictly increasing so that keyset pagination
    /// over millisecond cursors never sees two posts with the same key.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = now_millis();
        let created = match self.last_created {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_created = Some(created);
        created
    }
}

/// In-process store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_posts(&self, limit: usize, before: Option<DateTime<Utc>>) -> Result<Vec<Post>> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| before.is_none_or(|cursor| p.created_at < cursor))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        Ok(posts)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn post_owner(&self, id: PostId) -> Result<Option<UserId>> {
        Ok(self
            .tables
            .read()
            .await
            .posts
            .get(&id)
            .map(|p| p.creator_id))
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post> {
        let mut tables = self.tables.write().await;
        tables.next_post_id += 1;
        let id = tables.next_post_id;
        let created_at = tables.next_created_at();

        let row = Post {
            id,
            title: post.title,
            text: post.text,
            creator_name: post.creator_name,
            creator_id: post.creator_id,
            created_at,
            updated_at: created_at,
        };
        tables.posts.insert(id, row.clone());
        Ok(row)
    }

    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        title: &str,
        text: &str,
    ) -> Result<Option<Post>> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables.posts.get_mut(&id).filter(|p| p.is_owned_by(owner)) else {
            return Ok(None);
        };
        post.title = title.to_string();
        post.text = text.to_string();
        post.updated_at = now_millis().max(post.created_at);
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let owned = tables.posts.get(&id).is_some_and(|p| p.is_owned_by(owner));
        if owned {
            tables.posts.remove(&id);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn create_user(&self, first_name: &str, last_name: &str) -> Result<User> {
        let mut tables = self.tables.write().await;
        tables.next_user_id += 1;
        let user = User::new(
            tables.next_user_id,
            first_name.to_string(),
            last_name.to_string(),
        );
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn rename_user(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.first_name = first_name.to_string();
            user.last_name = last_name.to_string();
            user.clone()
        }))
    }
}
