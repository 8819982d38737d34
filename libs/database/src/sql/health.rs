use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Ping the database with `SELECT 1`
///
/// The statement is built for whichever backend the connection uses.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let backend = db.get_database_backend();
    debug!(?backend, "Running database health check");

    let stmt = Statement::from_string(backend, "SELECT 1".to_owned());
    db.query_one(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("{:?}: {}", backend, e)))?;

    debug!("Database health check passed");
    Ok(())
}
