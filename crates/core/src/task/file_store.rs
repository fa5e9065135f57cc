//! File-based task storage implementation
//!
//! Stores the whole task document as JSON in a single file on disk. Every
//! mutation rewrites the file while the write lock is held, and a
//! mutation whose write fails leaves the stored tasks unchanged.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::document::TaskDocument;
use super::id::IdGenerator;
use super::model::{NewTask, SubTaskId, Task, TaskFilter, TaskId};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of the document
    document: RwLock<TaskDocument>,
    ids: IdGenerator,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                TaskDocument::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    Error::Storage(format!("Failed to parse {}: {}", path.display(), e))
                })?
            }
        } else {
            TaskDocument::new()
        };
        debug!(path = %path.display(), tasks = document.tasks.len(), "Loaded task document");

        let ids = IdGenerator::starting_after(document.max_id().unwrap_or(0));
        Ok(Self {
            path,
            document: RwLock::new(document),
            ids,
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document to disk
    async fn persist(&self, document: &TaskDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Apply `op` to a copy of the document under the write lock. The copy
    /// replaces the document only once it has been written to disk.
    async fn mutate<T>(&self, op: impl FnOnce(&mut TaskDocument) -> Result<T>) -> Result<T> {
        let mut document = self.document.write().await;
        let mut next = document.clone();
        let value = op(&mut next)?;
        self.persist(&next).await?;
        *document = next;
        Ok(value)
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        Ok(self.document.read().await.list(filter))
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.document.read().await.get(id).cloned())
    }

    async fn create(&self, new_task: NewTask) -> Result<Task> {
        let task = self
            .mutate(|doc| doc.create(new_task, &self.ids))
            .await?;
        info!(task_id = task.id, "Task created");
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let task = self.mutate(|doc| doc.update(task)).await?;
        info!(task_id = task.id, "Task updated");
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> Result<TaskId> {
        let id = self.mutate(|doc| doc.delete_task(id)).await?;
        info!(task_id = id, "Task deleted");
        Ok(id)
    }

    async fn update_subtask_status(
        &self,
        task_id: TaskId,
        subtask_id: SubTaskId,
        is_completed: bool,
    ) -> Result<Task> {
        self.mutate(|doc| doc.update_subtask_status(task_id, subtask_id, is_completed))
            .await
    }

    async fn delete_subtask(&self, task_id: TaskId, subtask_id: SubTaskId) -> Result<SubTaskId> {
        self.mutate(|doc| Ok(doc.delete_subtask(task_id, subtask_id)))
            .await
    }

    async fn update_task_completion(&self, task_id: TaskId, is_completed: bool) -> Result<TaskId> {
        self.mutate(|doc| Ok(doc.update_task_completion(task_id, is_completed)))
            .await
    }
}
