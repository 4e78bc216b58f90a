use anyhow::{Result, bail};
use colored::Colorize;

use super::CommandContext;
use crate::config::{CONFIG_FILE_NAME, PostboardConfig};

pub fn handle_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = ctx.root.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    PostboardConfig::default().save(&path)?;
    println!("{} {}", "Initialized".green(), path.display());
    Ok(())
}
