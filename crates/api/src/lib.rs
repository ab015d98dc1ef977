//! User API Library
//!
//! This crate provides the HTTP REST API. Handlers decode requests, call
//! the injected `UserService` and encode JSON responses.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tracing::info;

use common::{AppError, AppResult};
use user_service_lib::{create_repository, UserManager, UserService};

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the service graph from configuration and serve until shutdown.
pub async fn run_server(config: ApiConfig) -> AppResult<()> {
    // Repository -> service -> handlers
    let repo = create_repository(&config.repository).await?;
    let user_service: Arc<dyn UserService> = Arc::new(UserManager::new(repo));
    let state = AppState::new(user_service.clone());

    let app = create_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::configuration(format!("Failed to bind to {}: {}", addr, e)))?;
    info!("User API listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)));

    user_service.close().await;
    info!("User API stopped");

    served
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
