use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use super::SqlConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Connect to a database URL with the default pool settings
///
/// # Example
/// ```ignore
/// use database::sql::connect;
///
/// let db = connect("sqlite::memory:").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(SqlConfig::new(database_url)).await
}

/// Connect using a [`SqlConfig`]
///
/// With FromEnv (requires `config` feature):
/// ```ignore
/// use core_config::FromEnv;
/// use database::sql::{SqlConfig, connect_from_config};
///
/// let db = connect_from_config(SqlConfig::from_env()?).await?;
/// ```
pub async fn connect_from_config(config: SqlConfig) -> Result<DatabaseConnection, DbErr> {
    let backend = backend_name(config.url());
    let db = Database::connect(config.into_connect_options()).await?;
    info!(backend, "Connected to database");
    Ok(db)
}

/// Connect from config, retrying with exponential backoff
///
/// Startup calls this so the API can come up before the database does.
/// On exhaustion the last driver error is wrapped in
/// [`DatabaseError::ConnectionFailed`].
pub async fn connect_from_config_with_retry(
    config: SqlConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DatabaseError> {
    let retry_config = retry_config.unwrap_or_default();

    retry_with_backoff(
        || {
            let config = config.clone();
            async move {
                connect_from_config(config).await.inspect_err(|e| {
                    warn!(error = %e, "Database connection attempt failed");
                })
            }
        },
        retry_config,
    )
    .await
    .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Run pending migrations for the given Migrator
///
/// # Example
/// ```ignore
/// use database::sql::run_migrations;
/// use migration::Migrator;
///
/// run_migrations::<Migrator>(&db, "todo_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

fn backend_name(url: &str) -> &'static str {
    if url.starts_with("sqlite:") {
        "sqlite"
    } else if url.starts_with("postgres") {
        "postgres"
    } else {
        "unknown"
    }
}
