//! aerowx - an in-memory airport weather observation server
//!
//! This is the main entry point for the aerowx application.

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use aerowx::airport_loader::load_airports;
use aerowx::handlers::{build_router, heartbeat};
use aerowx::logging::log_startup;
use aerowx::{init_tracing, log_error, AppState, Config, Result, WeatherError};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.enable_all().build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    log_startup(&config);
    heartbeat::mark_start();

    let state = AppState::new_shared(config.clone());

    if let Some(path) = &config.data.airports_file {
        let summary = load_airports(path, &state).map_err(|e| {
            log_error(&e, "loading airport file");
            e
        })?;
        info!(
            "Loaded {} airports ({} rows skipped)",
            summary.loaded, summary.skipped
        );
    }

    let app = build_router(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| WeatherError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| WeatherError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WeatherError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
