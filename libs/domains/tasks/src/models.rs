use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::TITLE_REQUIRED;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIST_LIMIT: u64 = 5;

/// Task priority levels
///
/// Stored as its rank so `ORDER BY priority DESC` yields HIGH, MEDIUM, LOW.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TaskPriority {
    #[sea_orm(num_value = 0)]
    Low,
    /// Default priority
    #[default]
    #[sea_orm(num_value = 1)]
    Medium,
    #[sea_orm(num_value = 2)]
    High,
}

/// Task entity - represents a task
///
/// Serialized in camelCase with absent optional fields as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier, increasing in creation order
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Set exactly while `completed` is true
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a task
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CreateTask {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a task
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears
/// it. Setting `completed` also sets or clears `completed_at`.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UpdateTask {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    pub category: Option<Option<String>>,
    pub tags: Option<Option<Vec<String>>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
}

impl UpdateTask {
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(TITLE_REQUIRED.into()));
    }
    Ok(())
}

/// Query filter for finding and counting tasks
///
/// Built once with the consuming methods below and not changed afterwards.
/// Unset criteria match every task.
///
/// ```
/// use domain_tasks::{TaskFilter, TaskPriority};
///
/// let filter = TaskFilter::new()
///     .completed(false)
///     .priority(TaskPriority::High)
///     .search("report");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub(crate) completed: Option<bool>,
    pub(crate) priority: Option<TaskPriority>,
    pub(crate) category: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) due_before: Option<DateTime<Utc>>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Exact match on category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Substring match on title or description.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Tasks whose due date is strictly before `instant`. Tasks without a
    /// due date never match.
    pub fn due_before(mut self, instant: DateTime<Utc>) -> Self {
        self.due_before = Some(instant);
        self
    }
}

/// Column a grouped count is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskGroupField {
    Priority,
    Category,
}

/// Aggregate counts returned by `GET /tasks/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    /// Pending tasks whose due date has passed
    pub overdue: u64,
    /// Pending tasks per priority
    pub by_priority: BTreeMap<String, u64>,
    /// Pending tasks per non-null category
    pub by_category: BTreeMap<String, u64>,
}
