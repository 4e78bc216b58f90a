mod init;
mod migrate;
mod query;
mod schema;
mod serve;
mod user;

pub use init::handle_init;
pub use migrate::handle_migrate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;
pub use user::{handle_user_add, handle_user_rename};

use crate::config::{PostboardConfig, SeedUser};
use crate::error::{PostboardError, Result};
use crate::service::PostService;
use crate::storage::open_store;
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: PostboardConfig,
    pub root: PathBuf,
}

impl CommandContext {
    /// Loads configuration from `config_path` or by searching upward from
    /// `root`, then applies a database URL override.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        database_url: Option<String>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => PostboardConfig::load_from(path)?,
            None => PostboardConfig::load(root)?,
        };
        if database_url.is_some() {
            config.database.url = database_url;
        }
        Ok(Self {
            config,
            root: root.to_path_buf(),
        })
    }

    /// Adds users to seed the in-memory store with.
    pub fn seed_users(&mut self, users: Vec<SeedUser>) {
        if !users.is_empty() && self.config.database.url.is_some() {
            tracing::warn!("--seed-user ignored: a database is configured");
        }
        self.config.seed.users.extend(users);
    }

    /// The configured database URL. Commands whose effects must outlive the
    /// process refuse to run against the in-memory store.
    pub fn database_url(&self) -> Result<&str> {
        self.config.database.url.as_deref().ok_or_else(|| {
            PostboardError::Config(
                "No database configured. Set DATABASE_URL or [database] url in postboard.toml"
                    .to_string(),
            )
        })
    }

    pub async fn service(&self) -> Result<PostService> {
        let store = open_store(&self.config).await?;
        Ok(PostService::new(store))
    }
}
