use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use crate::storage::PgStore;

pub async fn handle_migrate(ctx: &CommandContext) -> Result<()> {
    let url = ctx.database_url()?;

    let store = PgStore::connect(&ctx.config.database, url)
        .await
        .context("Failed to connect to database")?;
    store.migrate().await.context("Failed to apply migrations")?;

    println!("{}", "Migrations applied".green());
    Ok(())
}
