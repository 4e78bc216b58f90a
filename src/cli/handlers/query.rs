use anyhow::{Context, Result, bail};
use async_graphql::{Request, Variables};

use super::CommandContext;
use crate::graphql::{build_schema, prepare_request};
use crate::identity::Identity;

pub async fn handle_query(
    ctx: &CommandContext,
    query: String,
    variables: Option<String>,
    as_user: Option<i32>,
) -> Result<()> {
    let mut request = Request::new(query);
    if let Some(vars) = variables {
        let json: serde_json::Value =
            serde_json::from_str(&vars).context("Variables must be a JSON object")?;
        request = request.variables(Variables::from_json(json));
    }

    let service = ctx.service().await.context("Failed to open store")?;
    let schema = build_schema(service.clone());
    let request = prepare_request(request, &service, as_user.map(Identity::new));
    let response = schema.execute(request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    if response.is_err() {
        bail!("GraphQL request returned {} error(s)", response.errors.len());
    }
    Ok(())
}
