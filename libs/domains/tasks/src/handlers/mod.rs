mod params;
mod rest;

use axum::{
    Router,
    routing::{get, post},
};
use axum_helpers::ErrorResponse;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Task, TaskPriority, TaskStats};
use crate::repository::TaskRepository;
use crate::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::service::TaskService;

pub use params::{parse_id, parse_strict_id};

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::list_tasks,
        rest::task_stats,
        rest::get_task,
        rest::create_task,
        rest::update_task,
        rest::delete_task,
        rest::complete_task,
        rest::uncomplete_task,
    ),
    components(
        schemas(Task, TaskPriority, TaskStats, CreateTaskRequest, UpdateTaskRequest, ErrorResponse)
    ),
    tags(
        (name = "tasks", description = "Task tracking")
    )
)]
pub struct TasksApiDoc;

/// Router serving everything under `/tasks`
pub fn tasks_router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    let routes = Router::new()
        .route("/", get(rest::list_tasks).post(rest::create_task))
        .route("/stats", get(rest::task_stats))
        .route(
            "/{id}",
            get(rest::get_task)
                .put(rest::update_task)
                .delete(rest::delete_task),
        )
        .route("/{id}/done", post(rest::complete_task))
        .route("/{id}/uncomplete", post(rest::uncomplete_task))
        .with_state(shared_service);

    Router::new().nest("/tasks", routes)
}
