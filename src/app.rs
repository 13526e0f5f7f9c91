use crate::handler::{self, CommandResponse};
use crate::resolve::Resolver;
use crate::slack::SigningSecret;
use crate::types::IncomingRequest;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub secret: Arc<SigningSecret>,
    pub resolver: Arc<dyn Resolver>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Any method is routed so the validator can answer non-POST with 405.
        .route("/slack/command", any(slash_command_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn slash_command_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> CommandResponse {
    info!(
        "Received {} /slack/command, body length: {} bytes",
        method,
        body.len()
    );

    let request = IncomingRequest::new(method, headers, body);
    handler::handle(&request, &state.secret, state.resolver.as_ref()).await
}
