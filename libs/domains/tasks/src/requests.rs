//! Wire-level request bodies and query strings.
//!
//! Fields arrive loosely typed so that each bad value gets its own 400
//! message, and a missing title wins over every other problem. The `into_*` methods turn them into validated domain inputs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::error::{
    INVALID_CATEGORY, INVALID_DESCRIPTION, INVALID_DUE_DATE, INVALID_LIMIT, INVALID_PRIORITY,
    TITLE_REQUIRED, TaskError, TaskResult,
};
use crate::models::{CreateTask, DEFAULT_LIST_LIMIT, TaskFilter, TaskPriority, UpdateTask};

/// Body of `POST /tasks`. Unknown fields (such as `completed`) are ignored.
///
/// Every field is taken as raw JSON so the title check runs before any
/// other field is looked at.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[schema(value_type = String)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    /// HIGH, MEDIUM or LOW; defaults to MEDIUM
    #[schema(value_type = Option<String>)]
    pub priority: Option<Value>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[schema(value_type = Option<String>)]
    pub due_date: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub category: Option<Value>,
    /// Anything but an array is stored as no tags
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Value>,
}

impl CreateTaskRequest {
    pub fn into_create_task(self) -> TaskResult<CreateTask> {
        let title = match self.title {
            Some(Value::String(title)) if !title.trim().is_empty() => title,
            _ => return Err(TaskError::validation(TITLE_REQUIRED)),
        };

        let priority = priority_value(self.priority.as_ref())?.unwrap_or_default();
        let due_date = match self.due_date {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => parse_due_date(&raw)?,
            Some(_) => return Err(TaskError::validation(INVALID_DUE_DATE)),
        };

        Ok(CreateTask {
            title,
            description: text_value(self.description, INVALID_DESCRIPTION)?,
            priority,
            category: text_value(self.category, INVALID_CATEGORY)?.filter(|c| !c.is_empty()),
            tags: self.tags.as_ref().and_then(tags_value),
            due_date,
        })
    }
}

/// Body of `PUT /tasks/{id}`
///
/// Absent fields are left unchanged. An explicit `null` clears the nullable
/// ones; an empty `dueDate` string clears it too, and so does a `tags`
/// value that is not an array.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub due_date: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn into_update_task(self) -> TaskResult<UpdateTask> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TaskError::validation(TITLE_REQUIRED));
        }

        let due_date = match self.due_date {
            None => None,
            Some(raw) => Some(raw.as_deref().map(parse_due_date).transpose()?.flatten()),
        };

        Ok(UpdateTask {
            title: self.title,
            description: self.description,
            priority: parse_priority(self.priority.as_deref())?,
            category: self.category,
            tags: self.tags.as_ref().map(tags_value),
            due_date,
            completed: self.completed,
        })
    }
}

/// Query string of `GET /tasks`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTasksParams {
    /// HIGH, MEDIUM or LOW
    pub priority: Option<String>,
    pub category: Option<String>,
    /// Substring of title or description
    pub search: Option<String>,
    /// `true` lists completed tasks instead of pending ones
    pub show_completed: Option<String>,
    /// Maximum number of tasks, default 5
    pub limit: Option<String>,
}

impl ListTasksParams {
    pub fn into_query(self) -> TaskResult<(TaskFilter, u64)> {
        let show_completed = self.show_completed.as_deref() == Some("true");
        let mut filter = TaskFilter::new().completed(show_completed);

        if let Some(priority) = parse_priority(self.priority.as_deref())? {
            filter = filter.priority(priority);
        }
        if let Some(category) = self.category.filter(|c| !c.is_empty()) {
            filter = filter.category(category);
        }
        if let Some(search) = self.search.filter(|s| !s.is_empty()) {
            filter = filter.search(search);
        }

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_LIST_LIMIT,
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| TaskError::validation(INVALID_LIMIT))?,
        };

        Ok((filter, limit))
    }
}

/// `null`, `false`, `0` and `""` mean "not given"; any other non-string is invalid.
fn priority_value(raw: Option<&Value>) -> TaskResult<Option<TaskPriority>> {
    match raw {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::String(value)) => parse_priority(Some(value.as_str())),
        Some(_) => Err(TaskError::validation(INVALID_PRIORITY)),
    }
}

fn text_value(raw: Option<Value>, message: &str) -> TaskResult<Option<String>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(TaskError::validation(message)),
    }
}

/// String elements of an array; `None` for anything else.
fn tags_value(raw: &Value) -> Option<Vec<String>> {
    raw.as_array().map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    })
}

/// Empty means "not given".
fn parse_priority(raw: Option<&str>) -> TaskResult<Option<TaskPriority>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| TaskError::validation(INVALID_PRIORITY)),
    }
}

/// Empty means "no due date". Bare dates are midnight UTC.
fn parse_due_date(raw: &str) -> TaskResult<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| TaskError::validation(INVALID_DUE_DATE))
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn validation_message(err: TaskError) -> String {
        match err {
            TaskError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_defaults() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"Buy milk","completed":true}"#).unwrap();
        let input = request.into_create_task().unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.priority, TaskPriority::Medium);
        assert_eq!(input.due_date, None);
        assert_eq!(input.tags, None);
    }

    #[test]
    fn test_create_missing_or_empty_title() {
        for body in [r#"{}"#, r#"{"title":""}"#, r#"{"title":"  ","priority":"HIGH"}"#] {
            let request: CreateTaskRequest = serde_json::from_str(body).unwrap();
            let err = request.into_create_task().unwrap_err();
            assert_eq!(validation_message(err), TITLE_REQUIRED);
        }
    }

    #[test]
    fn test_create_title_checked_before_other_fields() {
        for body in [
            r#"{"tags":"work"}"#,
            r#"{"priority":5}"#,
            r#"{"title":"","description":3}"#,
            r#"{"title":7,"dueDate":true}"#,
            r#"{"title":null,"category":["x"]}"#,
        ] {
            let request: CreateTaskRequest = serde_json::from_str(body).unwrap();
            let err = request.into_create_task().unwrap_err();
            assert_eq!(validation_message(err), TITLE_REQUIRED, "body {}", body);
        }
    }

    #[test]
    fn test_create_tags_must_be_an_array() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"t","tags":"work"}"#).unwrap();
        assert_eq!(request.into_create_task().unwrap().tags, None);

        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"t","tags":["a",1,"b"]}"#).unwrap();
        assert_eq!(
            request.into_create_task().unwrap().tags,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_create_rejects_mistyped_fields_after_title() {
        let cases = [
            (r#"{"title":"t","priority":5}"#, INVALID_PRIORITY),
            (r#"{"title":"t","description":3}"#, INVALID_DESCRIPTION),
            (r#"{"title":"t","category":false}"#, INVALID_CATEGORY),
            (r#"{"title":"t","dueDate":20250301}"#, INVALID_DUE_DATE),
        ];
        for (body, message) in cases {
            let request: CreateTaskRequest = serde_json::from_str(body).unwrap();
            assert_eq!(validation_message(request.into_create_task().unwrap_err()), message);
        }

        let falsy: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"t","priority":""}"#).unwrap();
        assert_eq!(falsy.into_create_task().unwrap().priority, TaskPriority::Medium);
    }

    #[test]
    fn test_update_non_array_tags_clear() {
        let request: UpdateTaskRequest = serde_json::from_str(r#"{"tags":"work"}"#).unwrap();
        assert_eq!(request.into_update_task().unwrap().tags, Some(None));

        let request: UpdateTaskRequest = serde_json::from_str(r#"{"tags":null}"#).unwrap();
        assert_eq!(request.into_update_task().unwrap().tags, Some(None));

        let request: UpdateTaskRequest = serde_json::from_str(r#"{"tags":["x"]}"#).unwrap();
        assert_eq!(
            request.into_update_task().unwrap().tags,
            Some(Some(vec!["x".to_string()]))
        );
    }

    #[test]
    fn test_create_rejects_unknown_priority() {
        let request = CreateTaskRequest {
            title: Some(json!("t")),
            priority: Some(json!("URGENT")),
            ..Default::default()
        };
        assert_eq!(
            validation_message(request.into_create_task().unwrap_err()),
            INVALID_PRIORITY
        );
    }

    #[test]
    fn test_create_parses_due_date_forms() {
        let with = |due: &str| CreateTaskRequest {
            title: Some(json!("t")),
            due_date: Some(json!(due)),
            ..Default::default()
        };

        let date_only = with("2025-03-01").into_create_task().unwrap();
        assert_eq!(
            date_only.due_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );

        let rfc3339 = with("2025-03-01T10:30:00+02:00").into_create_task().unwrap();
        assert_eq!(
            rfc3339.due_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap())
        );

        assert!(with("").into_create_task().unwrap().due_date.is_none());
        assert_eq!(
            validation_message(with("next tuesday").into_create_task().unwrap_err()),
            INVALID_DUE_DATE
        );
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let request: UpdateTaskRequest =
            serde_json::from_str(r#"{"description":"x","category":null}"#).unwrap();
        let update = request.into_update_task().unwrap();
        assert_eq!(update.description, Some(Some("x".to_string())));
        assert_eq!(update.category, Some(None));
        assert_eq!(update.title, None);
        assert_eq!(update.priority, None);
        assert_eq!(update.due_date, None);
        assert_eq!(update.tags, None);
    }

    #[test]
    fn test_update_empty_due_date_clears() {
        for body in [r#"{"dueDate":""}"#, r#"{"dueDate":null}"#] {
            let request: UpdateTaskRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.into_update_task().unwrap().due_date, Some(None));
        }
    }

    #[test]
    fn test_update_rejects_empty_title_and_bad_priority() {
        let blank: UpdateTaskRequest = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert_eq!(
            validation_message(blank.into_update_task().unwrap_err()),
            TITLE_REQUIRED
        );

        let bad: UpdateTaskRequest = serde_json::from_str(r#"{"priority":"urgent"}"#).unwrap();
        assert_eq!(
            validation_message(bad.into_update_task().unwrap_err()),
            INVALID_PRIORITY
        );
    }

    #[test]
    fn test_list_defaults_to_pending_and_five() {
        let (filter, limit) = ListTasksParams::default().into_query().unwrap();
        assert_eq!(filter, TaskFilter::new().completed(false));
        assert_eq!(limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_list_builds_filter() {
        let params = ListTasksParams {
            priority: Some("HIGH".into()),
            category: Some("work".into()),
            search: Some("report".into()),
            show_completed: Some("true".into()),
            limit: Some("20".into()),
        };
        let (filter, limit) = params.into_query().unwrap();
        assert_eq!(
            filter,
            TaskFilter::new()
                .completed(true)
                .priority(TaskPriority::High)
                .category("work")
                .search("report")
        );
        assert_eq!(limit, 20);
    }

    #[test]
    fn test_list_show_completed_only_exact_true() {
        let params = ListTasksParams {
            show_completed: Some("yes".into()),
            ..Default::default()
        };
        let (filter, _) = params.into_query().unwrap();
        assert_eq!(filter, TaskFilter::new().completed(false));
    }

    #[test]
    fn test_list_rejects_bad_limit() {
        for raw in ["abc", "-1", "2.5"] {
            let params = ListTasksParams {
                limit: Some(raw.into()),
                ..Default::default()
            };
            assert_eq!(
                validation_message(params.into_query().unwrap_err()),
                INVALID_LIMIT
            );
        }
    }
}
