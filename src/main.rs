use anca::api::{
    create_control_router, create_dashboard_router, create_ws_router, ControlAppState,
    DashboardAppState, WsAppState,
};
use anca::config::{resolve_config, RefreshMode};
use anca::control::RunControl;
use anca::session::{run_refresh_ticker, RefreshCoordinator, Session};
use anca::telemetry::MockTelemetryFeed;
use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anca=info".into()),
        )
        .init();

    info!("ANCA coordinator starting...");

    let config = resolve_config().context("Failed to load configuration")?;

    info!(
        bind_addr = %config.api.bind_addr,
        refresh_mode = ?config.refresh.mode,
        agent_count = config.session.agent_count,
        control_auth = config.api.control_token.is_some(),
        "Configuration loaded"
    );

    let session = Session::new(
        config.session.run_config(),
        config.fleet.roster.clone(),
        config.session.initial_fairness,
    )
    .context("Invalid session defaults")?;
    info!(session = %session.id(), "Session created");

    let feed = Arc::new(MockTelemetryFeed::from_config(&config.telemetry));
    let coordinator = Arc::new(RefreshCoordinator::new(
        session.clone(),
        feed,
        config.refresh_options(),
    ));
    let control = RunControl::new(session);

    let ticker_handle = match config.refresh.mode {
        RefreshMode::Scheduled => Some(tokio::spawn(run_refresh_ticker(
            Arc::clone(&coordinator),
            config.refresh.base_interval(),
        ))),
        RefreshMode::Render => None,
    };

    let router = create_control_router(ControlAppState {
        control,
        control_token: config.api.control_token.clone(),
    })
    .merge(create_dashboard_router(Arc::new(DashboardAppState {
        coordinator: Arc::clone(&coordinator),
        refresh_mode: config.refresh.mode,
        map: config.map.clone(),
    })))
    .merge(create_ws_router(Arc::new(WsAppState {
        coordinator: Arc::clone(&coordinator),
    })))
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.api.bind_addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.api.bind_addr))?;
    info!(addr = %config.api.bind_addr, "Dashboard API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Dashboard API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    if let Some(handle) = ticker_handle {
        handle.abort();
    }
    info!("ANCA coordinator stopped");

    Ok(())
}
