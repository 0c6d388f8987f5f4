use std::sync::Arc;

use marketplace_api::app;
use marketplace_api::config;
use marketplace_api::middleware::GateState;
use marketplace_api::services::SettingsService;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting marketplace API in {:?} mode", config.environment);

    let gate = GateState::new(Arc::new(SettingsService::new()));
    let app = app::router(gate);

    // Allow deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Marketplace API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
