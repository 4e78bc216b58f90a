//! GraphQL schema, resolvers and HTTP server for postboard.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! postboard serve --port 4000
//!
//! # Execute a query from CLI
//! postboard query '{ posts(limit: 10) { hasMore posts { id title textSnippet } } }'
//!
//! # Execute a mutation as user 1
//! postboard query --as-user 1 'mutation { deletePost(id: 3) { deleted outcome } }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `posts`, `post`
//! - **Mutations** (authenticated): `createPost`, `updatePost`, `deletePost`
//!
//! Each request gets its own [`creator_loader`], so `Post.creator` lookups are
//! batched and cached only for the lifetime of that request.

mod guard;
mod loader;
mod schema;
mod server;
mod types;

pub use guard::{AuthGuard, NOT_AUTHENTICATED};
pub use loader::{CreatorLoader, UserLoader, creator_loader};
pub use schema::{MutationRoot, PostboardSchema, QueryRoot, build_schema, prepare_request};
pub use server::{router, run_server};
pub use types::*;
