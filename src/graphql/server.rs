use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use super::schema::{PostboardSchema, prepare_request};
use crate::error::Result;
use crate::identity::IdentityProvider;
use crate::service::PostService;

#[derive(Clone)]
struct ServerState {
    schema: PostboardSchema,
    service: PostService,
    identity: Arc<dyn IdentityProvider>,
}

async fn graphql_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let identity = state.identity.identify(&headers);
    let request = prepare_request(req.into_inner(), &state.service, identity);
    state.schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(
    schema: PostboardSchema,
    service: PostService,
    identity: Arc<dyn IdentityProvider>,
) -> Router {
    let state = ServerState {
        schema,
        service,
        identity,
    };
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .with_state(state)
}

/// Serves the API on `address` until Ctrl-C.
pub async fn run_server(app: Router, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!(address = %listener.local_addr()?, "GraphQL server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("GraphQL server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
