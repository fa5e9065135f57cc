//! Application state

use std::path::Path;
use std::sync::Arc;

use taskdesk_core::task::{
    demo_tasks, FileTaskStore, InMemoryTaskStore, TaskDocument, TaskRepository,
};

use crate::config::{ServerConfig, StorageKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: Arc<dyn TaskRepository>,
    storage: StorageKind,
}

impl AppState {
    /// Open the configured task store, seeding demo data if asked to
    pub async fn new(config: &ServerConfig) -> taskdesk_core::Result<Self> {
        let task_store: Arc<dyn TaskRepository> = match config.storage {
            StorageKind::File => {
                let path = config.tasks_path();
                if config.seed_demo {
                    seed_file(&path).await?;
                }
                Arc::new(FileTaskStore::new(path).await?)
            }
            StorageKind::Memory => {
                let tasks = if config.seed_demo {
                    demo_tasks()
                } else {
                    Vec::new()
                };
                Arc::new(InMemoryTaskStore::with_tasks(tasks))
            }
        };

        Ok(Self::with_store(task_store, config.storage))
    }

    /// Wrap an already built store
    pub fn with_store(task_store: Arc<dyn TaskRepository>, storage: StorageKind) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_store,
                storage,
            }),
        }
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &dyn TaskRepository {
        self.inner.task_store.as_ref()
    }

    pub fn storage(&self) -> StorageKind {
        self.inner.storage
    }
}

/// Write the demo document unless a task file already exists
async fn seed_file(path: &Path) -> taskdesk_core::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let document = TaskDocument::from_tasks(demo_tasks());
    tokio::fs::write(path, serde_json::to_string_pretty(&document)?).await?;
    tracing::info!("Seeded demo tasks into {:?}", path);
    Ok(())
}
