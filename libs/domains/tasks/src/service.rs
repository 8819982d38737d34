use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter, TaskGroupField, TaskStats, UpdateTask};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List tasks matching `filter` in list order
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, filter: TaskFilter, limit: u64) -> TaskResult<Vec<Task>> {
        self.repository.find(filter, limit).await
    }

    /// Aggregate counts; the six store queries run concurrently
    ///
    /// Per-priority and per-category counts only cover pending tasks.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> TaskResult<TaskStats> {
        let pending = TaskFilter::new().completed(false);
        let overdue = pending.clone().due_before(Utc::now());

        let (total, completed, pending_count, overdue, by_priority, by_category) = tokio::try_join!(
            self.repository.count(TaskFilter::new()),
            self.repository.count(TaskFilter::new().completed(true)),
            self.repository.count(pending.clone()),
            self.repository.count(overdue),
            self.repository
                .group_count(TaskGroupField::Priority, pending.clone()),
            self.repository.group_count(TaskGroupField::Category, pending),
        )?;

        Ok(TaskStats {
            total,
            completed,
            pending: pending_count,
            overdue,
            by_priority,
            by_category,
        })
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Update a task
    #[instrument(skip(self, input), fields(task_id = id))]
    pub async fn update_task(&self, id: i32, input: UpdateTask) -> TaskResult<Task> {
        input.validate()?;
        self.repository.update_by_id(id, input).await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<()> {
        self.repository.delete_by_id(id).await
    }

    /// Mark a task as completed
    ///
    /// Completing an already completed task refreshes `completed_at`.
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn complete_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .update_by_id(id, UpdateTask::completion(true))
            .await
    }

    /// Mark a task as incomplete
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn uncomplete_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .update_by_id(id, UpdateTask::completion(false))
            .await
    }
}
