use anyhow::{Context, Result};
use clap::Parser;

use postboard::cli::handlers::{self, CommandContext};
use postboard::cli::{Cli, Commands, UserCommands};
use postboard::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let root = std::env::current_dir().context("Failed to read current directory")?;
    let mut ctx = CommandContext::load(&root, cli.config.as_deref(), cli.database_url)
        .context("Failed to load config")?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    match cli.command {
        Commands::Init { force } => handlers::handle_init(&ctx, force),
        Commands::Serve {
            host,
            port,
            seed_users,
        } => {
            ctx.seed_users(seed_users);
            runtime.block_on(handlers::handle_serve(ctx, host, port))
        }
        Commands::Query {
            query,
            variables,
            as_user,
            seed_users,
        } => {
            ctx.seed_users(seed_users);
            runtime.block_on(handlers::handle_query(&ctx, query, variables, as_user))
        }
        Commands::Schema => handlers::handle_schema(),
        Commands::Migrate => runtime.block_on(handlers::handle_migrate(&ctx)),
        Commands::User { command } => match command {
            UserCommands::Add {
                first_name,
                last_name,
                json,
            } => runtime.block_on(handlers::handle_user_add(&ctx, first_name, last_name, json)),
            UserCommands::Rename {
                id,
                first_name,
                last_name,
                json,
            } => runtime.block_on(handlers::handle_user_rename(
                &ctx, id, first_name, last_name, json,
            )),
        },
    }
}
