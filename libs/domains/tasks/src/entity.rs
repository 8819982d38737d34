use crate::models::{Task, TaskPriority};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the `tasks` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub category: Option<String>,
    /// JSON array of strings
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub due_date: Option<DateTimeUtc>,
    pub completed: bool,
    pub completed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn encode_tags(tags: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tags)
}

fn decode_tags(id: i32, raw: &str) -> Option<Vec<String>> {
    serde_json::from_str(raw)
        .inspect_err(|e| tracing::warn!(task_id = id, error = %e, "Ignoring malformed tags column"))
        .ok()
}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for Task {
    fn from(model: Model) -> Self {
        let tags = model.tags.as_deref().and_then(|raw| decode_tags(model.id, raw));
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            priority: model.priority,
            category: model.category,
            tags,
            due_date: model.due_date,
            completed: model.completed,
            completed_at: model.completed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
