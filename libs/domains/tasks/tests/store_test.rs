//! Store tests for the SeaORM task repository
//!
//! Every test gets its own in-memory SQLite database with migrations applied.

use chrono::{Duration, Utc};
use domain_tasks::*;
use test_utils::assertions::assert_some;
use test_utils::{TestDatabase, TestDataBuilder};

async fn repository() -> (TestDatabase, SqlTaskRepository) {
    let db = TestDatabase::new().await;
    let repo = SqlTaskRepository::new(db.connection());
    (db, repo)
}

fn with_priority(title: &str, priority: TaskPriority) -> CreateTask {
    CreateTask {
        priority,
        ..CreateTask::new(title)
    }
}

#[tokio::test]
async fn test_create_assigns_id_and_defaults() {
    let (_db, repo) = repository().await;
    let builder = TestDataBuilder::from_test_name("store_create_defaults");

    let task = repo.create(CreateTask::new(builder.title("a"))).await.unwrap();

    assert!(task.id > 0);
    assert_eq!(task.title, builder.title("a"));
    assert_eq!(task.priority, TaskPriority::Medium);
    assert!(!task.completed);
    assert!(task.completed_at.is_none());
    assert!(task.updated_at >= task.created_at);

    let second = repo.create(CreateTask::new(builder.title("b"))).await.unwrap();
    assert!(second.id > task.id);
}

#[tokio::test]
async fn test_create_stores_optional_fields() {
    let (_db, repo) = repository().await;
    let due = Utc::now() + Duration::days(2);

    let task = repo
        .create(CreateTask {
            description: Some("two litres".into()),
            category: Some("home".into()),
            tags: Some(vec!["errand".into(), "quick".into()]),
            due_date: Some(due),
            ..with_priority("Buy milk", TaskPriority::High)
        })
        .await
        .unwrap();

    let stored = assert_some(repo.get_by_id(task.id).await.unwrap(), "stored task");
    assert_eq!(stored.description.as_deref(), Some("two litres"));
    assert_eq!(stored.category.as_deref(), Some("home"));
    assert_eq!(stored.tags, Some(vec!["errand".to_string(), "quick".to_string()]));
    assert_eq!(stored.priority, TaskPriority::High);
    assert_eq!(
        stored.due_date.map(|d| d.timestamp()),
        Some(due.timestamp())
    );
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let (_db, repo) = repository().await;

    let err = repo.create(CreateTask::new("")).await.unwrap_err();
    assert!(matches!(err, TaskError::Validation(_)));
    assert_eq!(repo.count(TaskFilter::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_orders_priority_before_recency() {
    let (_db, repo) = repository().await;

    let a = repo
        .create(with_priority("A", TaskPriority::Low))
        .await
        .unwrap();
    let b = repo
        .create(with_priority("B", TaskPriority::High))
        .await
        .unwrap();
    let c = repo
        .create(with_priority("C", TaskPriority::Medium))
        .await
        .unwrap();

    let tasks = repo.find(TaskFilter::new(), 10).await.unwrap();
    let ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b.id, c.id, a.id]);
}

#[tokio::test]
async fn test_find_limit_returns_newest_first() {
    let (_db, repo) = repository().await;

    let mut created = Vec::new();
    for i in 0..7 {
        created.push(repo.create(CreateTask::new(format!("task {}", i))).await.unwrap());
    }

    let tasks = repo
        .find(TaskFilter::new().completed(false), DEFAULT_LIST_LIMIT)
        .await
        .unwrap();

    assert_eq!(tasks.len(), 5);
    let expected: Vec<i32> = created.iter().rev().take(5).map(|t| t.id).collect();
    let ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, expected);
    test_utils::assertions::assert_sorted_desc(&tasks, |t| t.created_at, "created_at");
}

#[tokio::test]
async fn test_find_puts_pending_before_completed() {
    let (_db, repo) = repository().await;

    let done = repo.create(with_priority("done", TaskPriority::High)).await.unwrap();
    repo.update_by_id(done.id, UpdateTask::completion(true))
        .await
        .unwrap();
    let open = repo.create(with_priority("open", TaskPriority::Low)).await.unwrap();

    let tasks = repo.find(TaskFilter::new(), 10).await.unwrap();
    assert_eq!(tasks[0].id, open.id);
    assert_eq!(tasks[1].id, done.id);
}

#[tokio::test]
async fn test_find_filters() {
    let (_db, repo) = repository().await;

    repo.create(CreateTask {
        category: Some("work".into()),
        ..with_priority("Quarterly report", TaskPriority::High)
    })
    .await
    .unwrap();
    repo.create(CreateTask {
        description: Some("draft the report outline".into()),
        category: Some("home".into()),
        ..CreateTask::new("Evening")
    })
    .await
    .unwrap();
    repo.create(CreateTask::new("Walk the dog")).await.unwrap();

    let by_search = repo
        .find(TaskFilter::new().search("report"), 10)
        .await
        .unwrap();
    assert_eq!(by_search.len(), 2);

    let by_category = repo
        .find(TaskFilter::new().category("home"), 10)
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].title, "Evening");

    let by_priority = repo
        .find(TaskFilter::new().priority(TaskPriority::High), 10)
        .await
        .unwrap();
    assert_eq!(by_priority.len(), 1);

    let combined = repo
        .find(
            TaskFilter::new()
                .search("report")
                .priority(TaskPriority::Medium),
            10,
        )
        .await
        .unwrap();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].title, "Evening");
}

#[tokio::test]
async fn test_search_matches_wildcard_characters_literally() {
    let (_db, repo) = repository().await;

    for title in ["a_b", "axb", "100% done", r"back\slash"] {
        repo.create(CreateTask::new(title)).await.unwrap();
    }

    let titles = |tasks: Vec<Task>| tasks.into_iter().map(|t| t.title).collect::<Vec<_>>();

    let underscore = repo.find(TaskFilter::new().search("_"), 10).await.unwrap();
    assert_eq!(titles(underscore), vec!["a_b"]);

    let percent = repo.find(TaskFilter::new().search("%"), 10).await.unwrap();
    assert_eq!(titles(percent), vec!["100% done"]);

    let backslash = repo.find(TaskFilter::new().search(r"\"), 10).await.unwrap();
    assert_eq!(titles(backslash), vec![r"back\slash"]);

    let plain = repo.find(TaskFilter::new().search("b"), 10).await.unwrap();
    assert_eq!(plain.len(), 3);
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let (_db, repo) = repository().await;
    let task = repo
        .create(CreateTask {
            category: Some("work".into()),
            ..with_priority("Keep me", TaskPriority::High)
        })
        .await
        .unwrap();

    let updated = repo
        .update_by_id(
            task.id,
            UpdateTask {
                description: Some(Some("x".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description.as_deref(), Some("x"));
    assert_eq!(updated.title, "Keep me");
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.category.as_deref(), Some("work"));
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at >= task.updated_at);
}

#[tokio::test]
async fn test_update_null_clears_fields() {
    let (_db, repo) = repository().await;
    let task = repo
        .create(CreateTask {
            category: Some("work".into()),
            tags: Some(vec!["a".into()]),
            due_date: Some(Utc::now()),
            ..CreateTask::new("Clear me")
        })
        .await
        .unwrap();

    let updated = repo
        .update_by_id(
            task.id,
            UpdateTask {
                category: Some(None),
                tags: Some(None),
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.category.is_none());
    assert!(updated.tags.is_none());
    assert!(updated.due_date.is_none());
}

#[tokio::test]
async fn test_completion_keeps_completed_at_in_step() {
    let (_db, repo) = repository().await;
    let task = repo.create(CreateTask::new("Finish")).await.unwrap();

    let first = repo
        .update_by_id(task.id, UpdateTask::completion(true))
        .await
        .unwrap();
    assert!(first.completed);
    let first_at = assert_some(first.completed_at, "completed_at after completion");

    let second = repo
        .update_by_id(task.id, UpdateTask::completion(true))
        .await
        .unwrap();
    assert!(second.completed);
    assert!(assert_some(second.completed_at, "completed_at after repeat") >= first_at);

    let reopened = repo
        .update_by_id(task.id, UpdateTask::completion(false))
        .await
        .unwrap();
    assert!(!reopened.completed);
    assert!(reopened.completed_at.is_none());
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (_db, repo) = repository().await;

    let err = repo
        .update_by_id(404, UpdateTask::completion(true))
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::NotFound(404)));
}

#[tokio::test]
async fn test_delete() {
    let (_db, repo) = repository().await;
    let task = repo.create(CreateTask::new("Remove me")).await.unwrap();

    repo.delete_by_id(task.id).await.unwrap();
    assert!(repo.get_by_id(task.id).await.unwrap().is_none());
    assert!(repo.find(TaskFilter::new(), 10).await.unwrap().is_empty());

    let err = repo.delete_by_id(task.id).await.unwrap_err();
    assert!(matches!(err, TaskError::NotFound(_)));
}

#[tokio::test]
async fn test_count_and_group_count() {
    let (_db, repo) = repository().await;

    repo.create(CreateTask {
        category: Some("work".into()),
        ..with_priority("w1", TaskPriority::High)
    })
    .await
    .unwrap();
    repo.create(CreateTask {
        category: Some("work".into()),
        ..with_priority("w2", TaskPriority::High)
    })
    .await
    .unwrap();
    repo.create(with_priority("none", TaskPriority::Low))
        .await
        .unwrap();
    let done = repo
        .create(CreateTask {
            category: Some("home".into()),
            ..CreateTask::new("done")
        })
        .await
        .unwrap();
    repo.update_by_id(done.id, UpdateTask::completion(true))
        .await
        .unwrap();

    let pending = TaskFilter::new().completed(false);
    assert_eq!(repo.count(TaskFilter::new()).await.unwrap(), 4);
    assert_eq!(repo.count(pending.clone()).await.unwrap(), 3);

    let by_priority = repo
        .group_count(TaskGroupField::Priority, pending.clone())
        .await
        .unwrap();
    assert_eq!(by_priority.get("HIGH"), Some(&2));
    assert_eq!(by_priority.get("LOW"), Some(&1));
    assert_eq!(by_priority.get("MEDIUM"), None);

    let by_category = repo
        .group_count(TaskGroupField::Category, pending)
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category.get("work"), Some(&2));
}

#[tokio::test]
async fn test_due_before_skips_undated_tasks() {
    let (_db, repo) = repository().await;
    let now = Utc::now();

    repo.create(CreateTask {
        due_date: Some(now - Duration::days(1)),
        ..CreateTask::new("late")
    })
    .await
    .unwrap();
    repo.create(CreateTask {
        due_date: Some(now + Duration::days(1)),
        ..CreateTask::new("upcoming")
    })
    .await
    .unwrap();
    repo.create(CreateTask::new("undated")).await.unwrap();

    let overdue = repo
        .count(TaskFilter::new().completed(false).due_before(now))
        .await
        .unwrap();
    assert_eq!(overdue, 1);
}

#[tokio::test]
async fn test_cloned_repository_shares_the_database() {
    let (db, repo) = repository().await;
    let clone = repo.clone();
    let from_handle = SqlTaskRepository::new(db.connection());

    let task = repo.create(CreateTask::new("Shared")).await.unwrap();

    let seen = assert_some(clone.get_by_id(task.id).await.unwrap(), "task through clone");
    assert_eq!(seen.title, "Shared");
    assert_eq!(from_handle.count(TaskFilter::new()).await.unwrap(), 1);
}
