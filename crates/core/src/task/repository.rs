//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{NewTask, SubTaskId, Task, TaskFilter, TaskId};
use crate::Result;

/// Repository interface for tasks and their subtasks
///
/// Every mutation is visible to the next read. `update`, `delete_task` and
/// `update_subtask_status` fail when the addressed task or subtask is missing;
/// `delete_subtask` and `update_task_completion` silently do nothing instead.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// List tasks in insertion order, optionally narrowed by a search term
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// Create an open task with no subtasks
    async fn create(&self, new_task: NewTask) -> Result<Task>;

    /// Replace the stored task with the same ID
    async fn update(&self, task: Task) -> Result<Task>;

    /// Delete a task and its subtasks
    async fn delete_task(&self, id: TaskId) -> Result<TaskId>;

    /// Set a single subtask's completion flag, leaving the task flag alone
    async fn update_subtask_status(
        &self,
        task_id: TaskId,
        subtask_id: SubTaskId,
        is_completed: bool,
    ) -> Result<Task>;

    /// Remove a subtask from its task
    async fn delete_subtask(&self, task_id: TaskId, subtask_id: SubTaskId) -> Result<SubTaskId>;

    /// Set the task's completion flag and cascade it to every subtask
    async fn update_task_completion(&self, task_id: TaskId, is_completed: bool) -> Result<TaskId>;
}
