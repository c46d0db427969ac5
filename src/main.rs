use axum::{Server, ServiceExt, body::Body, http::Request};
use std::net::SocketAddr;
use std::sync::Arc;
use talentmap_backend::{
    AppState, app,
    config::Config,
    db::{create_pool, run_migrations},
    error::{AppError, AppResult},
    init_tracing,
};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let db = create_pool(&config)?;
    if config.run_migrations {
        let mut conn = db.get()?;
        let applied = run_migrations(&mut conn)?;
        tracing::info!(count = applied.len(), versions = ?applied, "Migrations applied");
    }

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let service = app(Arc::new(AppState::new(db, config)));

    tracing::info!(%addr, "Server running");
    Server::bind(&addr)
        .serve(ServiceExt::<Request<Body>>::into_make_service(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
