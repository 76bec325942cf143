//! Sensii coach server
//!
//! Main entry point for the HTTP API server.

use std::time::Duration;

use infrastructure::{AppConfig, LogFormat, init_tracing};
use presentation_http::{ShutdownOutcome, routes, serve_until_drained, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log format can be chosen
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    init_tracing(LogFormat::from_config(&config.server.log_format))?;

    info!("🎮 Sensii coach v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        provider = config.coach_provider.as_deref().unwrap_or("gemini"),
        "Configuration loaded"
    );

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    let cors_layer = cors_layer(&config.server.allowed_origins);

    let state = AppState::from_config(config);
    if state.dispatcher().is_none() {
        warn!("Serving without a coaching pipeline; /api/v1/ready reports the reason");
    }

    // Add middleware (order matters: first added = outermost)
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let listener = TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    match serve_until_drained(server, signalled_rx, shutdown_timeout).await? {
        ShutdownOutcome::Drained => info!("👋 Server shutdown complete"),
        ShutdownOutcome::DeadlineElapsed => {
            warn!("👋 Server shutdown forced after {:?}", shutdown_timeout);
        },
    }

    Ok(())
}

/// CORS for the overlay client
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    use axum::http::{HeaderValue, Method};
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
