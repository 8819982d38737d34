//! SQLite test infrastructure
//!
//! Each `TestDatabase` is a private in-memory database held by a single
//! pooled connection, so tests never see each other's rows.

use database::sql::{SqlConfig, connect_from_config, run_migrations};
use migration::Migrator;
use sea_orm::DatabaseConnection;

/// In-memory test database with the workspace migrations applied
///
/// The database disappears when the last clone of `connection` is dropped.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// # Example
    ///
    /// ```ignore
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// let repository = domain_tasks::SqlTaskRepository::new(db.connection());
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection = connect_from_config(SqlConfig::new("sqlite::memory:"))
            .await
            .expect("Failed to open in-memory SQLite database");

        run_migrations::<Migrator>(&connection, "test")
            .await
            .expect("Failed to run migrations");

        tracing::debug!("Test database ready (SQLite in memory)");

        Self { connection }
    }

    /// A handle to the database; clones share the same connection pool
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
