//! Data models for postboard.
//!
//! - [`Post`]: a post with a denormalised creator name
//! - [`NewPost`]: the values needed to insert a post
//! - [`User`]: the author referenced by `Post::creator_id`

mod post;
mod user;

pub use post::{NewPost, Post, PostId, SNIPPET_LENGTH, now_millis};
pub use user::{User, UserId};
