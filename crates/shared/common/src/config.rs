//! Shared configuration structures.

use std::env;

// =============================================================================
// Environment variable names
// =============================================================================

/// Backend selector ("inmemory" or "postgres")
pub const ENV_REPOSITORY_TYPE: &str = "REPOSITORY_TYPE";
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_SSLMODE: &str = "DB_SSLMODE";
pub const ENV_DB_NAME: &str = "DB_NAME";

/// Repository configuration.
///
/// Selects which storage backend is constructed and how to reach it.
/// Every field falls back to the empty string when its variable is unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Backend type, kept raw so unknown values can be rejected at startup
    pub kind: String,
    pub host: String,
    pub user: String,
    pub password: String,
    pub ssl_mode: String,
    pub db_name: String,
}

impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("ssl_mode", &self.ssl_mode)
            .field("db_name", &self.db_name)
            .finish()
    }
}

impl RepositoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` (or `from_path`) first to pick up an env file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        Self {
            kind: var(ENV_REPOSITORY_TYPE),
            host: var(ENV_DB_HOST),
            user: var(ENV_DB_USER),
            password: var(ENV_DB_PASSWORD),
            ssl_mode: var(ENV_DB_SSLMODE),
            db_name: var(ENV_DB_NAME),
        }
    }

    /// In-memory configuration, used by tests and zero-dependency runs.
    pub fn in_memory() -> Self {
        Self {
            kind: "inmemory".to_string(),
            ..Self::default()
        }
    }
}
