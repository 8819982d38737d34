use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task, TaskFilter, TaskGroupField, UpdateTask};

/// Store contract for Task persistence
///
/// Results of `find` are ordered completed ASC, priority DESC, created_at
/// DESC, with id DESC as the final tie-breaker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task; id and timestamps are assigned by the store.
    /// Fails with `Validation` when the title is empty.
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Matching tasks in list order, at most `limit` of them
    async fn find(&self, filter: TaskFilter, limit: u64) -> TaskResult<Vec<Task>>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Apply a partial update; fails with `NotFound` for an unknown id
    async fn update_by_id(&self, id: i32, input: UpdateTask) -> TaskResult<Task>;

    /// Hard delete; fails with `NotFound` for an unknown id
    async fn delete_by_id(&self, id: i32) -> TaskResult<()>;

    async fn count(&self, filter: TaskFilter) -> TaskResult<u64>;

    /// Count per distinct non-null value of `field`
    async fn group_count(
        &self,
        field: TaskGroupField,
        filter: TaskFilter,
    ) -> TaskResult<BTreeMap<String, u64>>;
}
