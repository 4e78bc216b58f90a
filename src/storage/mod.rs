//! Storage layer for posts and users.
//!
//! ## Components
//!
//! - [`Store`]: the async contract the post service relies on
//! - [`MemoryStore`]: in-process tables, used when no database is configured
//! - [`PgStore`]: PostgreSQL via `sqlx`, with embedded migrations
//! - [`open_store`]: picks an implementation from configuration

mod memory;
mod postgres;
mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::Store;

use crate::config::{PostboardConfig, SeedUser};
use crate::error::Result;
use crate::validation;
use std::sync::Arc;

/// Opens the configured store: PostgreSQL when a database URL is set,
/// otherwise an in-memory store holding only the configured seed users.
pub async fn open_store(config: &PostboardConfig) -> Result<Arc<dyn Store>> {
    match config.database.url.as_deref() {
        Some(url) => {
            let store = PgStore::connect(&config.database, url).await?;
            if config.database.run_migrations {
                store.migrate().await?;
                tracing::info!("database migrations applied");
            }
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("no database configured, using in-memory store");
            let store = MemoryStore::new();
            seed_users(&store, &config.seed.users).await?;
            Ok(Arc::new(store))
        }
    }
}

async fn seed_users(store: &MemoryStore, users: &[SeedUser]) -> Result<()> {
    for seed in users {
        validation::validate_name(&seed.first_name)?;
        validation::validate_name(&seed.last_name)?;
        let user = store.create_user(&seed.first_name, &seed.last_name).await?;
        tracing::info!(id = user.id, name = %user.display_name(), "seeded user");
    }
    Ok(())
}
