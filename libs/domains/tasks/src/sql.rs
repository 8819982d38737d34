use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::BTreeMap;
use validator::Validate;

use crate::{
    entity::{self, Column, Entity, encode_tags},
    error::{TaskError, TaskResult},
    models::{CreateTask, Task, TaskFilter, TaskGroupField, TaskPriority, UpdateTask},
    repository::TaskRepository,
};

/// [`TaskRepository`] over any SeaORM connection (PostgreSQL or SQLite)
#[derive(Clone)]
pub struct SqlTaskRepository {
    db: DatabaseConnection,
}

impl SqlTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn condition(filter: &TaskFilter) -> Condition {
    Condition::all()
        .add_option(filter.completed.map(|c| Column::Completed.eq(c)))
        .add_option(filter.priority.map(|p| Column::Priority.eq(p)))
        .add_option(filter.category.as_deref().map(|c| Column::Category.eq(c)))
        .add_option(filter.search.as_deref().map(|text| {
            Condition::any()
                .add(Column::Title.like(contains_pattern(text)))
                .add(Column::Description.like(contains_pattern(text)))
        }))
        .add_option(filter.due_before.map(|d| Column::DueDate.lt(d)))
}

/// `%text%` with backslash, `%` and `_` matched literally
fn contains_pattern(text: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

fn tags_column(tags: Option<&[String]>) -> TaskResult<Option<String>> {
    tags.map(encode_tags)
        .transpose()
        .map_err(|e| TaskError::Database(format!("failed to encode tags: {}", e)))
}

#[async_trait]
impl TaskRepository for SqlTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        input.validate()?;

        let now = Utc::now();
        let active_model = entity::ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            priority: Set(input.priority),
            category: Set(input.category),
            tags: Set(tags_column(input.tags.as_deref())?),
            due_date: Set(input.due_date),
            completed: Set(false),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn find(&self, filter: TaskFilter, limit: u64) -> TaskResult<Vec<Task>> {
        let models = Entity::find()
            .filter(condition(&filter))
            .order_by_asc(Column::Completed)
            .order_by_desc(Column::Priority)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update_by_id(&self, id: i32, input: UpdateTask) -> TaskResult<Task> {
        input.validate()?;

        let now = Utc::now();
        let mut active_model = entity::ActiveModel {
            id: Unchanged(id),
            updated_at: Set(now),
            ..<entity::ActiveModel as ActiveModelTrait>::default()
        };

        if let Some(title) = input.title {
            active_model.title = Set(title);
        }
        if let Some(description) = input.description {
            active_model.description = Set(description);
        }
        if let Some(priority) = input.priority {
            active_model.priority = Set(priority);
        }
        if let Some(category) = input.category {
            active_model.category = Set(category);
        }
        if let Some(tags) = input.tags {
            active_model.tags = Set(tags_column(tags.as_deref())?);
        }
        if let Some(due_date) = input.due_date {
            active_model.due_date = Set(due_date);
        }
        if let Some(completed) = input.completed {
            active_model.completed = Set(completed);
            active_model.completed_at = Set(completed.then_some(now));
        }

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::info!(task_id = id, "Updated task");
                Ok(model.into())
            }
            Err(DbErr::RecordNotUpdated) => Err(TaskError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: i32) -> TaskResult<()> {
        let result = Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(TaskError::NotFound(id));
        }

        tracing::info!(task_id = id, "Deleted task");
        Ok(())
    }

    async fn count(&self, filter: TaskFilter) -> TaskResult<u64> {
        let count = Entity::find()
            .filter(condition(&filter))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn group_count(
        &self,
        field: TaskGroupField,
        filter: TaskFilter,
    ) -> TaskResult<BTreeMap<String, u64>> {
        let counted = || {
            Entity::find()
                .select_only()
                .filter(condition(&filter))
        };

        let groups = match field {
            TaskGroupField::Priority => {
                let rows: Vec<(TaskPriority, i64)> = counted()
                    .column(Column::Priority)
                    .column_as(Expr::col(Column::Id).count(), "task_count")
                    .group_by(Column::Priority)
                    .into_tuple()
                    .all(&self.db)
                    .await?;

                rows.into_iter()
                    .map(|(priority, n)| (priority.to_string(), n as u64))
                    .collect()
            }
            TaskGroupField::Category => {
                let rows: Vec<(Option<String>, i64)> = counted()
                    .filter(Column::Category.is_not_null())
                    .column(Column::Category)
                    .column_as(Expr::col(Column::Id).count(), "task_count")
                    .group_by(Column::Category)
                    .into_tuple()
                    .all(&self.db)
                    .await?;

                rows.into_iter()
                    .filter_map(|(category, n)| category.map(|c| (c, n as u64)))
                    .collect()
            }
        };

        Ok(groups)
    }
}

