//! Route composition for the Todo API.

use axum::{
    Router,
    extract::State,
    response::Response,
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, health_router, run_health_checks};
use core_config::Environment;
use database::sql::{DatabaseConnection, check_health};
use domain_tasks::{SqlTaskRepository, TaskService, tasks_router};
use std::io;

use crate::config::Config;
use crate::openapi::ApiDoc;

/// Readiness check that pings the database.
pub async fn ready_handler(State(db): State<DatabaseConnection>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

/// Task routes backed by the SQL store.
pub fn routes(db: &DatabaseConnection) -> Router {
    let repository = SqlTaskRepository::new(db.clone());
    tasks_router(TaskService::new(repository))
}

/// The full application: API routes, docs, middleware, `/health` and `/ready`.
pub fn app(config: &Config, db: &DatabaseConnection) -> io::Result<Router> {
    build(&config.environment, config.app, db)
}

fn build(
    environment: &Environment,
    app_info: core_config::AppInfo,
    db: &DatabaseConnection,
) -> io::Result<Router> {
    let router = axum_helpers::create_router::<ApiDoc>(routes(db), environment)?;

    Ok(router
        .merge(health_router(app_info))
        .merge(ready_router(db.clone())))
}
