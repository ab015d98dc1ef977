//! Database connection and initialization.

use std::str::FromStr;

use sea_orm::sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, RuntimeErr, SqlxPostgresConnector, Statement,
};
use sea_orm_migration::MigratorTrait;

use common::RepositoryConfig;

use super::migrations::Migrator;

/// Database wrapper for connection management
pub struct Database {
    connection: DatabaseConnection,
    /// Underlying pool, absent for connections built in tests
    pool: Option<PgPool>,
}

impl Database {
    /// Connect, verify connectivity and run pending migrations.
    pub async fn connect(config: &RepositoryConfig) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;
        db.ping().await?;

        // Run pending migrations
        Migrator::up(&db.connection, None).await?;
        tracing::info!(host = %config.host, db_name = %config.db_name, "Database connected and migrations applied");

        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &RepositoryConfig) -> Result<Self, DbErr> {
        let options = connect_options(config)?;
        let pool = PgPoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;

        Ok(Self {
            connection: SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone()),
            pool: Some(pool),
        })
    }

    /// Wrap an existing connection (used with SeaORM's mock database).
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            pool: None,
        }
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Give up the wrapper and hand back the connection.
    pub fn into_connection(self) -> DatabaseConnection {
        self.connection
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        // Get applied migrations from database
        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        // Map all defined migrations with their applied status
        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the pool. Later calls are no-ops.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            if !pool.is_closed() {
                pool.close().await;
                tracing::info!("Database pool closed");
            }
        }
    }
}

/// Translate the `user/dbname/password/host/sslmode` tuple into typed
/// connect options. Empty fields keep the driver default.
fn connect_options(config: &RepositoryConfig) -> Result<PgConnectOptions, DbErr> {
    let mut options = PgConnectOptions::new();

    if !config.host.is_empty() {
        options = options.host(&config.host);
    }
    if !config.user.is_empty() {
        options = options.username(&config.user);
    }
    if !config.password.is_empty() {
        options = options.password(&config.password);
    }
    if !config.db_name.is_empty() {
        options = options.database(&config.db_name);
    }
    if !config.ssl_mode.is_empty() {
        let mode = PgSslMode::from_str(&config.ssl_mode)
            .map_err(|_| DbErr::Custom(format!("invalid sslmode '{}'", config.ssl_mode)))?;
        options = options.ssl_mode(mode);
    }

    Ok(options)
}
