use anyhow::Result;
use std::sync::Arc;

use crate::graphql::build_schema;
use crate::service::PostService;
use crate::storage::MemoryStore;

pub fn handle_schema() -> Result<()> {
    // The SDL does not depend on the store behind the resolvers.
    let schema = build_schema(PostService::new(Arc::new(MemoryStore::new())));
    println!("{}", schema.sdl());
    Ok(())
}
