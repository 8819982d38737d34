use crate::models::NewTask;

/// Inputs of the "new task" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Submit is enabled only once the title has visible characters
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// The request body for the current inputs, or `None` if submit is disabled
    pub fn to_request(&self) -> Option<NewTask> {
        if !self.can_submit() {
            return None;
        }

        let description = self.description.trim();
        Some(NewTask {
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}
