use crate::error::PostboardError;
use crate::model::{User, UserId};
use crate::service::PostService;
use async_graphql::dataloader::{DataLoader, HashMapCache, Loader};
use std::collections::HashMap;
use std::sync::Arc;

/// Batches `Post.creator` lookups into one `find_users` call per tick.
pub struct UserLoader {
    service: PostService,
}

impl UserLoader {
    pub fn new(service: PostService) -> Self {
        Self { service }
    }
}

impl Loader<UserId> for UserLoader {
    type Value = User;
    type Error = Arc<PostboardError>;

    async fn load(&self, keys: &[UserId]) -> Result<HashMap<UserId, Self::Value>, Self::Error> {
        tracing::debug!(count = keys.len(), "batch loading creators");
        let users = self.service.users_by_ids(keys).await.map_err(Arc::new)?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

/// Creator loader with a cache that lives as long as the loader itself.
pub type CreatorLoader = DataLoader<UserLoader, HashMapCache>;

/// Builds a fresh loader for one request. Never share it across requests.
pub fn creator_loader(service: &PostService) -> CreatorLoader {
    DataLoader::with_cache(
        UserLoader::new(service.clone()),
        tokio::spawn,
        HashMapCache::default(),
    )
}
