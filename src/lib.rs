//! # Postboard - a GraphQL API for posts
//!
//! Postboard serves a single `Post` resource over GraphQL: newest-first
//! listing with keyset pagination, single fetch, and create/update/delete
//! restricted to the post's creator.
//!
//! ## Features
//!
//! - **Keyset pagination**: pages of at most 50 posts, continued with a
//!   millisecond timestamp cursor
//! - **Ownership-scoped writes**: updates and deletes only touch the caller's
//!   posts and report whether the target was missing or someone else's
//! - **Batched relations**: `Post.creator` is resolved through a per-request
//!   data loader
//! - **Pluggable storage**: PostgreSQL via `sqlx`, or an in-memory store
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a default config
//! postboard init
//!
//! # Prepare the database and add an author
//! DATABASE_URL=postgres://localhost/postboard postboard migrate
//! DATABASE_URL=postgres://localhost/postboard postboard user add Ada Lovelace
//!
//! # Serve the API; authenticated calls carry the `x-user-id` header
//! postboard serve --port 4000
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP server
//! - [`identity`]: Caller identity resolution
//! - [`model`]: Data models (Post, User)
//! - [`service`]: Post operations
//! - [`storage`]: Store trait and implementations
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `postboard.toml` configuration files.
pub mod config;

/// Error types and result aliases.
///
/// Defines `PostboardError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides the async-graphql schema and the axum server exposing it.
pub mod graphql;

pub mod identity;

/// Data models for posts and users.
pub mod model;

pub mod service;

/// Storage layer.
///
/// The `Store` trait plus in-memory and PostgreSQL implementations.
pub mod storage;

/// Input validation utilities.
///
/// Validates titles, bodies and user names.
pub mod validation;

pub mod logging;
