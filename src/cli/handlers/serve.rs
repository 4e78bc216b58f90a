use anyhow::{Context, Result};
use std::sync::Arc;

use super::CommandContext;
use crate::graphql::{build_schema, router, run_server};
use crate::identity::HeaderIdentity;

pub async fn handle_serve(mut ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if let Some(port) = port {
        ctx.config.server.port = port;
    }

    let identity = HeaderIdentity::new(&ctx.config.auth.identity_header)?;
    let service = ctx.service().await.context("Failed to open store")?;
    let schema = build_schema(service.clone());
    let app = router(schema, service, Arc::new(identity));

    let address = ctx.config.server.address();
    println!("Starting GraphQL server on http://{}/graphql", address);
    run_server(app, &address).await?;
    Ok(())
}
