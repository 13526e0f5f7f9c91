use kgsearch_slash::app::{router, AppState};
use kgsearch_slash::config::Config;
use kgsearch_slash::resolve::KnowledgeGraphClient;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kgsearch_slash=info,tower_http=info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let resolver = match KnowledgeGraphClient::new(config.kg_api_key.clone(), config.lookup_timeout)
    {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("Failed to build Knowledge Graph client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        secret: Arc::new(config.signing_secret),
        resolver: Arc::new(resolver),
    };

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
