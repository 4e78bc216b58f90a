use super::store::Store;
use crate::config::DatabaseSettings;
use crate::error::Result;
use crate::model::{NewPost, Post, PostId, User, UserId, now_millis};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};

const POST_COLUMNS: &str = "id, title, text, creator_name, creator_id, created_at, updated_at";
const USER_COLUMNS: &str = "id, first_name, last_name";

/// PostgreSQL-backed store.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(settings: &DatabaseSettings, url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(url)
            .await?;
        tracing::debug!(max_connections = settings.max_connections, "connected to postgres");
        Ok(Self { pool })
    }

    /// Applies the embedded migrations under `migrations/`.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_posts(&self, limit: usize, before: Option<DateTime<Utc>>) -> Result<Vec<Post>> {
        let limit = limit as i64;
        let posts = match before {
            Some(cursor) => {
                let sql = format!(
                    "SELECT {POST_COLUMNS} FROM posts WHERE created_at < $2 \
                     ORDER BY created_at DESC LIMIT $1"
                );
                sqlx::query_as::<_, Post>(&sql)
                    .bind(limit)
                    .bind(cursor)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql =
                    format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT $1");
                sqlx::query_as::<_, Post>(&sql)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(posts)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn post_owner(&self, id: PostId) -> Result<Option<UserId>> {
        let owner = sqlx::query_scalar::<_, UserId>("SELECT creator_id FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post> {
        // created_at is the pagination key, so it must move past the newest
        // committed row even when two inserts land in the same millisecond.
        let sql = format!(
            "WITH stamp AS ( \
                 SELECT GREATEST($5::timestamptz, \
                     (SELECT max(created_at) FROM posts) + interval '1 millisecond') AS at \
             ) \
             INSERT INTO posts (title, text, creator_name, creator_id, created_at, updated_at) \
             SELECT $1, $2, $3, $4, stamp.at, stamp.at FROM stamp \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(post.title)
            .bind(post.text)
            .bind(post.creator_name)
            .bind(post.creator_id)
            .bind(now_millis())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        title: &str,
        text: &str,
    ) -> Result<Option<Post>> {
        let sql = format!(
            "UPDATE posts SET title = $3, text = $4, updated_at = GREATEST($5, created_at) \
             WHERE id = $1 AND creator_id = $2 RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(owner)
            .bind(title)
            .bind(text)
            .bind(now_millis())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND creator_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create_user(&self, first_name: &str, last_name: &str) -> Result<User> {
        let sql = format!(
            "INSERT INTO users (first_name, last_name) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(first_name)
            .bind(last_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn rename_user(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<User>> {
        let sql = format!(
            "UPDATE users SET first_name = $2, last_name = $3 WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(first_name)
            .bind(last_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
