use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::{ErrorResponse, JsonBody};
use std::sync::Arc;

use super::params::{parse_id, parse_strict_id};
use crate::error::TaskResult;
use crate::models::{Task, TaskStats};
use crate::repository::TaskRepository;
use crate::requests::{CreateTaskRequest, ListTasksParams, UpdateTaskRequest};
use crate::service::TaskService;

/// List tasks with optional filters
///
/// Without `showCompleted=true` only pending tasks are returned.
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    params(ListTasksParams),
    responses(
        (status = 200, description = "List of tasks", body = Vec<Task>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Query(params): Query<ListTasksParams>,
) -> TaskResult<Json<Vec<Task>>> {
    let (filter, limit) = params.into_query()?;
    let tasks = service.list_tasks(filter, limit).await?;
    Ok(Json(tasks))
}

/// Task statistics
#[utoipa::path(
    get,
    path = "/tasks/stats",
    tag = "tasks",
    responses(
        (status = 200, description = "Aggregate counts", body = TaskStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn task_stats<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<TaskStats>> {
    let stats = service.stats().await?;
    Ok(Json(stats))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    let task = service.get_task(parse_id(&id)?).await?;
    Ok(Json(task))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, description = "Missing title or invalid field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    JsonBody(request): JsonBody<CreateTaskRequest>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(request.into_create_task()?).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task
///
/// Only the fields present in the body change.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Invalid ID or field", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateTaskRequest>,
) -> TaskResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let task = service.update_task(id, request.into_update_task()?).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    service.delete_task(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a task as completed
#[utoipa::path(
    post,
    path = "/tasks/{id}/done",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID, digits only")
    ),
    responses(
        (status = 204, description = "Task completed"),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn complete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    service.complete_task(parse_strict_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a task as not completed
#[utoipa::path(
    post,
    path = "/tasks/{id}/uncomplete",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task reopened"),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn uncomplete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    service.uncomplete_task(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
