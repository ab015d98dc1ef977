//! Repository selection from configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use common::{AppError, AppResult, RepositoryConfig};

use super::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
use crate::infra::Database;

/// Supported storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    InMemory,
    Postgres,
}

impl RepositoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryKind::InMemory => "inmemory",
            RepositoryKind::Postgres => "postgres",
        }
    }
}

impl FromStr for RepositoryKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inmemory" => Ok(RepositoryKind::InMemory),
            "postgres" => Ok(RepositoryKind::Postgres),
            other => Err(AppError::configuration(format!(
                "unknown repository type '{}', expected 'inmemory' or 'postgres'",
                other
            ))),
        }
    }
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the repository named by `config.kind`.
///
/// For PostgreSQL this connects, pings and applies pending migrations;
/// any of those failing is returned as `AppError::Configuration`.
pub async fn create_repository(config: &RepositoryConfig) -> AppResult<Arc<dyn UserRepository>> {
    let kind: RepositoryKind = config.kind.parse()?;
    tracing::info!(repository = %kind, "Creating user repository");

    match kind {
        RepositoryKind::InMemory => Ok(Arc::new(InMemoryUserRepository::new())),
        RepositoryKind::Postgres => {
            let db = Database::connect(config).await.map_err(|e| {
                AppError::configuration(format!("could not prepare postgres repository: {}", e))
            })?;
            Ok(Arc::new(PostgresUserRepository::new(db)))
        }
    }
}
