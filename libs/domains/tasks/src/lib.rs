//! Tasks Domain
//!
//! Everything behind the `/tasks` HTTP routes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP parsing, id checks, status codes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Store contract (trait + SeaORM implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, inputs, filters, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{SqlTaskRepository, TaskService, tasks_router};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite::memory:").await?;
//!
//! let service = TaskService::new(SqlTaskRepository::new(db));
//! let app = tasks_router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod requests;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::{TasksApiDoc, tasks_router};
pub use models::{
    CreateTask, DEFAULT_LIST_LIMIT, Task, TaskFilter, TaskGroupField, TaskPriority, TaskStats,
    UpdateTask,
};
pub use repository::TaskRepository;
pub use requests::{CreateTaskRequest, ListTasksParams, UpdateTaskRequest};
pub use service::TaskService;
pub use sql::SqlTaskRepository;
