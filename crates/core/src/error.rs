//! Error types for the core library

use thiserror::Error;

use crate::task::{SubTaskId, TaskId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Subtask {subtask_id} not found in task {task_id}")]
    SubTaskNotFound { task_id: TaskId, subtask_id: SubTaskId },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Whether this error means the addressed task or subtask does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_) | Self::SubTaskNotFound { .. })
    }
}
