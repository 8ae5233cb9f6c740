use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use employee_sdk::EmployeeApiClient;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log filter can come from it
    let config = config::Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting employee facade");
    tracing::info!(
        "Upstream {} (max attempts {}, initial backoff {} ms, multiplier {})",
        config.upstream_url,
        config.max_attempts,
        config.initial_backoff_ms,
        config.backoff_multiplier
    );

    let client = EmployeeApiClient::new(config.sdk_config()?)?;
    let api_state = employee_api::AppState::new(client.employees().clone());

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/employee", employee_api::routes(api_state))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
