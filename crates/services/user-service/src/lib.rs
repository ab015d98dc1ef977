//! User Service Library
//!
//! This crate provides the user storage contract, its backends and the
//! service layer that the HTTP API is built on.
//!
//! Composition happens once at startup:
//!
//! ```ignore
//! let repo = create_repository(&RepositoryConfig::from_env()).await?;
//! let service: Arc<dyn UserService> = Arc::new(UserManager::new(repo));
//! ```

pub mod infra;
pub mod repository;
pub mod service;

use common::{AppError, AppResult, RepositoryConfig};
use tracing::info;

use crate::infra::Database;

pub use repository::{create_repository, RepositoryKind, UserRepository};
pub use service::{UserManager, UserService};

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &RepositoryConfig, action: MigrateAction) -> AppResult<()> {
    let kind: RepositoryKind = config.kind.parse()?;
    if kind != RepositoryKind::Postgres {
        return Err(AppError::configuration(format!(
            "migrations require the postgres repository, got '{}'",
            kind
        )));
    }

    let db = Database::connect_without_migrations(config)
        .await
        .map_err(|e| AppError::configuration(format!("Database connection failed: {}", e)))?;

    let result = match action {
        MigrateAction::Up => db.run_migrations().await.map(|_| {
            info!("Migrations applied successfully");
        }),
        MigrateAction::Down => db.rollback_migration().await.map(|_| {
            info!("Rolled back last migration");
        }),
        MigrateAction::Status => db.migration_status().await.map(|status| {
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }),
        MigrateAction::Fresh => db.fresh_migrations().await.map(|_| {
            info!("Database reset and migrations applied");
        }),
    };

    db.close().await;
    result.map_err(|e| AppError::configuration(format!("Migration failed: {}", e)))
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
