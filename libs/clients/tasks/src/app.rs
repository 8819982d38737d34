use tracing::{info, warn};

use crate::client::TaskClient;
use crate::state::TodoState;

/// Load, submit and complete flows of the to-do list
#[derive(Debug, Clone, Default)]
pub struct TodoApp {
    client: TaskClient,
    pub state: TodoState,
}

impl TodoApp {
    pub fn new(client: TaskClient) -> Self {
        Self {
            client,
            state: TodoState::new(),
        }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    /// Fetch the pending list, replacing what is shown
    pub async fn load(&mut self) {
        self.state.start_loading();

        match self.client.list_tasks().await {
            Ok(tasks) => self.state.load_succeeded(tasks),
            Err(e) => {
                warn!("Loading tasks failed: {}", e);
                self.state.load_failed();
            }
        }
    }

    /// Create a task from the form, then reload
    ///
    /// Returns `false` without sending anything when submit is disabled.
    pub async fn submit(&mut self) -> bool {
        if !self.state.can_submit() {
            return false;
        }
        let Some(request) = self.state.form.to_request() else {
            return false;
        };

        match self.client.create_task(&request).await {
            Ok(task) => {
                info!(id = task.id, "Task created");
                self.state.create_succeeded();
                self.load().await;
                true
            }
            Err(e) => {
                warn!("Creating task failed: {}", e);
                self.state.create_failed();
                false
            }
        }
    }

    /// Mark a task done, then reload
    ///
    /// Returns `false` if a completion for `id` is already running or the call fails.
    pub async fn complete(&mut self, id: i32) -> bool {
        if !self.state.begin_complete(id) {
            return false;
        }

        match self.client.complete_task(id).await {
            Ok(()) => {
                self.state.complete_succeeded(id);
                self.load().await;
                true
            }
            Err(e) => {
                warn!(id, "Completing task failed: {}", e);
                self.state.complete_failed(id);
                false
            }
        }
    }
}
