//! In-memory task storage

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use super::document::TaskDocument;
use super::id::IdGenerator;
use super::model::{NewTask, SubTaskId, Task, TaskFilter, TaskId};
use super::repository::TaskRepository;
use crate::Result;

/// Task store that lives only as long as the process
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    document: RwLock<TaskDocument>,
    ids: IdGenerator,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let document = TaskDocument::from_tasks(tasks);
        let ids = IdGenerator::starting_after(document.max_id().unwrap_or(0));
        Self {
            document: RwLock::new(document),
            ids,
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        Ok(self.document.read().await.list(filter))
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.document.read().await.get(id).cloned())
    }

    async fn create(&self, new_task: NewTask) -> Result<Task> {
        let task = self.document.write().await.create(new_task, &self.ids)?;
        info!(task_id = task.id, "Task created");
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let task = self.document.write().await.update(task)?;
        info!(task_id = task.id, "Task updated");
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> Result<TaskId> {
        let id = self.document.write().await.delete_task(id)?;
        info!(task_id = id, "Task deleted");
        Ok(id)
    }

    async fn update_subtask_status(
        &self,
        task_id: TaskId,
        subtask_id: SubTaskId,
        is_completed: bool,
    ) -> Result<Task> {
        self.document
            .write()
            .await
            .update_subtask_status(task_id, subtask_id, is_completed)
    }

    async fn delete_subtask(&self, task_id: TaskId, subtask_id: SubTaskId) -> Result<SubTaskId> {
        Ok(self.document.write().await.delete_subtask(task_id, subtask_id))
    }

    async fn update_task_completion(&self, task_id: TaskId, is_completed: bool) -> Result<TaskId> {
        Ok(self
            .document
            .write()
            .await
            .update_task_completion(task_id, is_completed))
    }
}
