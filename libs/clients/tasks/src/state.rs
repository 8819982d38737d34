//! View state of the to-do list, independent of any rendering

use std::collections::HashSet;

use crate::form::TaskForm;
use crate::models::Task;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load tasks";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create task";
pub const COMPLETE_FAILED_MESSAGE: &str = "Failed to complete task";

#[derive(Debug, Clone, Default)]
pub struct TodoState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
    pub form: TaskForm,
    completing: HashSet<i32>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    pub fn load_succeeded(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.loading = false;
        self.error = None;
    }

    /// Keeps the previously shown tasks
    pub fn load_failed(&mut self) {
        self.loading = false;
        self.error = Some(LOAD_FAILED_MESSAGE.to_string());
    }

    /// Form inputs are disabled while a request is running
    pub fn inputs_enabled(&self) -> bool {
        !self.loading
    }

    pub fn can_submit(&self) -> bool {
        self.inputs_enabled() && self.form.can_submit()
    }

    pub fn create_succeeded(&mut self) {
        self.form.clear();
        self.error = None;
    }

    pub fn create_failed(&mut self) {
        self.error = Some(CREATE_FAILED_MESSAGE.to_string());
    }

    /// Mark `id` as completing; `false` if a completion is already in flight
    pub fn begin_complete(&mut self, id: i32) -> bool {
        self.completing.insert(id)
    }

    pub fn is_completing(&self, id: i32) -> bool {
        self.completing.contains(&id)
    }

    /// Drop the task from the visible list ahead of the reload
    pub fn complete_succeeded(&mut self, id: i32) {
        self.completing.remove(&id);
        self.tasks.retain(|task| task.id != id);
        self.error = None;
    }

    pub fn complete_failed(&mut self, id: i32) {
        self.completing.remove(&id);
        self.error = Some(COMPLETE_FAILED_MESSAGE.to_string());
    }

    /// The "no tasks" placeholder is shown only after loading settles
    pub fn is_empty(&self) -> bool {
        !self.loading && self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i32) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            priority: None,
            category: None,
            tags: None,
            due_date: None,
            completed: false,
            completed_at: None,
            created_at: None,
        }
    }

    #[test]
    fn test_inputs_disabled_while_loading() {
        let mut state = TodoState::new();
        state.form.title = "Task".to_string();
        state.start_loading();
        assert!(!state.inputs_enabled());
        assert!(!state.can_submit());
        assert!(!state.is_empty());

        state.load_succeeded(vec![]);
        assert!(state.can_submit());
        assert!(state.is_empty());
    }

    #[test]
    fn test_load_failure_sets_error_and_success_clears_it() {
        let mut state = TodoState::new();
        state.start_loading();
        state.load_failed();
        assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert!(!state.loading);

        state.start_loading();
        state.load_succeeded(vec![task(1)]);
        assert!(state.error.is_none());
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_create_success_clears_form() {
        let mut state = TodoState::new();
        state.form = TaskForm::new("Task Title", "Task Description");
        state.create_failed();
        assert_eq!(state.error.as_deref(), Some(CREATE_FAILED_MESSAGE));
        assert_eq!(state.form.title, "Task Title");

        state.create_succeeded();
        assert_eq!(state.form, TaskForm::default());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_completion_in_flight_blocks_second_attempt() {
        let mut state = TodoState::new();
        state.load_succeeded(vec![task(1), task(2)]);

        assert!(state.begin_complete(1));
        assert!(state.is_completing(1));
        assert!(!state.begin_complete(1));
        assert!(!state.is_completing(2));

        state.complete_succeeded(1);
        assert!(!state.is_completing(1));
        assert_eq!(state.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_completion_failure_releases_id() {
        let mut state = TodoState::new();
        state.load_succeeded(vec![task(1)]);

        assert!(state.begin_complete(1));
        state.complete_failed(1);
        assert!(!state.is_completing(1));
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.error.as_deref(), Some(COMPLETE_FAILED_MESSAGE));
        assert!(state.begin_complete(1));
    }
}
