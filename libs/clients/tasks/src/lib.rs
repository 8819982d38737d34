//! Client-side logic for the task tracker.
//!
//! Wraps the HTTP API in [`TaskClient`] and keeps the interactive state of
//! a to-do list (form inputs, loading flag, in-flight completions) in plain
//! structs so the flows can be driven without a UI.

pub mod app;
pub mod client;
pub mod error;
pub mod form;
pub mod format;
pub mod models;
pub mod state;

pub use app::TodoApp;
pub use client::{DEFAULT_API_URL, TaskClient};
pub use error::{ClientError, ClientResult};
pub use form::TaskForm;
pub use format::format_relative;
pub use models::{NewTask, Task, TaskStats};
pub use state::{
    COMPLETE_FAILED_MESSAGE, CREATE_FAILED_MESSAGE, LOAD_FAILED_MESSAGE, TodoState,
};
