use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::CommandContext;
use crate::model::User;
use crate::validation;

fn print_user(action: &str, user: &User, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
    } else {
        println!(
            "{} {} {}",
            action.green(),
            user.id.to_string().cyan(),
            user.display_name()
        );
    }
    Ok(())
}

pub async fn handle_user_add(
    ctx: &CommandContext,
    first_name: String,
    last_name: String,
    json: bool,
) -> Result<()> {
    ctx.database_url()?;
    validation::validate_name(&first_name)?;
    validation::validate_name(&last_name)?;

    let service = ctx.service().await.context("Failed to open store")?;
    let user = service.store().create_user(&first_name, &last_name).await?;
    print_user("Created", &user, json)
}

pub async fn handle_user_rename(
    ctx: &CommandContext,
    id: i32,
    first_name: String,
    last_name: String,
    json: bool,
) -> Result<()> {
    ctx.database_url()?;
    validation::validate_name(&first_name)?;
    validation::validate_name(&last_name)?;

    let service = ctx.service().await.context("Failed to open store")?;
    match service
        .store()
        .rename_user(id, &first_name, &last_name)
        .await?
    {
        Some(user) => print_user("Renamed", &user, json),
        None => bail!("User not found: {}", id),
    }
}
