//! Credential service entry point.

use credential_service::repository::InMemoryUserRepository;
use credential_service::routes;
use credential_service::{AppState, Config};
use service_common::{init_tracing, ActivityLogClient, ActivityLogConfig, TracingConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    init_tracing(&TracingConfig::default().with_service_name("credential-service"));

    let activity_log = ActivityLogClient::new(ActivityLogConfig::new(
        config.log_service_url.clone(),
        "credential-service",
    ))?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::new(
        config,
        Arc::new(InMemoryUserRepository::new()),
        activity_log,
    );
    let app = routes::router(state);

    info!("credential service listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("credential service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
