use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use smart_deals_api::auth::OidcVerifier;
use smart_deals_api::config::AppConfig;
use smart_deals_api::routes;
use smart_deals_api::state::AppState;
use smart_deals_api::store::MongoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGODB_URI etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("smart_deals_api=info,tower_http=info")),
        )
        .init();

    // Startup failures are fatal: bad config or an unreachable store must
    // terminate the process rather than serve degraded traffic.
    let config = AppConfig::from_env().context("invalid configuration")?;

    let store = MongoStore::connect(&config.database)
        .await
        .context("failed to connect to MongoDB")?;
    tracing::info!(database = %config.database.database, "MongoDB connected");

    let verifier = OidcVerifier::new(&config.identity);
    let state = AppState::new(Arc::new(store), Arc::new(verifier));
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Smart Deals server listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
