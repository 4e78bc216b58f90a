use crate::config::SeedUser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postboard")]
#[command(
    author,
    version,
    about = "A GraphQL API for posts with keyset pagination"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for postboard.toml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// PostgreSQL connection URL (overrides config; in-memory store if unset)
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "POSTBOARD_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default postboard.toml in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Start the GraphQL HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long, env = "POSTBOARD_HOST")]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long, env = "POSTBOARD_PORT")]
        port: Option<u16>,

        /// Add a user to the in-memory store before starting (repeatable)
        #[arg(long = "seed-user", value_name = "FIRST LAST")]
        seed_users: Vec<SeedUser>,
    },

    /// Execute a GraphQL operation in-process and print the JSON response
    Query {
        /// GraphQL document
        query: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,

        /// Run as this user id (required for mutations)
        #[arg(long)]
        as_user: Option<i32>,

        /// Add a user to the in-memory store before running (repeatable)
        #[arg(long = "seed-user", value_name = "FIRST LAST")]
        seed_users: Vec<SeedUser>,
    },

    /// Print the GraphQL schema (SDL)
    Schema,

    /// Apply database migrations
    Migrate,

    /// Manage users (requires a database)
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        first_name: String,
        last_name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a user's name. Existing posts keep the name they were created with.
    Rename {
        id: i32,
        first_name: String,
        last_name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
