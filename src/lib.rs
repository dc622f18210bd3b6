use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use config::Config;
use error::ServeError;
use state::AppState;

/// Open the stores, bind the listener and serve until Ctrl+C / SIGTERM.
pub async fn serve(config: Config) -> Result<(), ServeError> {
    let state = AppState::new(&config)?;
    info!("Task database at {}", config.database_path.display());

    let app = routes::router(state);
    let address = format!("{}:{}", config.bind_addr, config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
