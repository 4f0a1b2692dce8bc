//! contest-gateway server entry point.
//!
//! Wires the PostgreSQL store, payment processor client, and identity
//! verifier into the Axum HTTP server.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use contest_gateway::api;
use contest_gateway::app_state::AppState;
use contest_gateway::auth::firebase::FirebaseVerifier;
use contest_gateway::config::ServerConfig;
use contest_gateway::payments::stripe::StripeClient;
use contest_gateway::persistence::ContestStore;
use contest_gateway::persistence::postgres::PostgresStore;
use contest_gateway::service::OrderService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting contest-gateway");

    // Connect storage and run migrations
    let store: Arc<dyn ContestStore> = Arc::new(PostgresStore::connect(&config).await?);

    // Build external clients
    let payments = Arc::new(StripeClient::new(
        config.payment_api_base.clone(),
        config.payment_secret_key.clone(),
        config.client_domain.clone(),
    ));
    let verifier = Arc::new(FirebaseVerifier::new(
        config.identity_api_base.clone(),
        config.identity_api_key.clone(),
    ));

    // Build application state
    let orders = Arc::new(OrderService::new(Arc::clone(&store), payments));
    let app_state = AppState {
        store,
        orders,
        verifier,
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
