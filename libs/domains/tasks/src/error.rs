use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

pub const TITLE_REQUIRED: &str = "title required";
pub const INVALID_PRIORITY: &str = "invalid priority. Must be HIGH, MEDIUM, or LOW";
pub const INVALID_ID: &str = "invalid id";
pub const INVALID_LIMIT: &str = "invalid limit";
pub const INVALID_DUE_DATE: &str = "invalid dueDate";
pub const INVALID_DESCRIPTION: &str = "invalid description";
pub const INVALID_CATEGORY: &str = "invalid category";
pub const TASK_NOT_FOUND: &str = "task not found";

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TaskError::Validation(msg.into())
    }
}

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => AppError::NotFound(TASK_NOT_FOUND.to_string()),
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            TaskError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

/// Surfaces the first field message, e.g. "title required".
impl From<ValidationErrors> for TaskError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        TaskError::Validation(message)
    }
}
