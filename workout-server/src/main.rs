use clap::Parser;
use colored::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use workout_core::LogStore;
use workout_server::{config::Config, errors::ServerError, router, AppState};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(workout_server::config::DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("{}", "Workout Log Server".bold().cyan());
    tracing::info!(
        "{} {} ({} on malformed data)",
        "Data file:".cyan(),
        config.data_file.display(),
        config.on_malformed
    );

    let store = LogStore::new(config.data_file.clone(), config.on_malformed);
    let app = router(Arc::new(AppState::new(store)));

    let addr = config.bind_address;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Starting workout server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Workout server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(%e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
