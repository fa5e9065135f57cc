//! The task document
//!
//! All stores hold one `TaskDocument` and apply every operation to it in a
//! single synchronous step while holding their write lock.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::id::IdGenerator;
use super::model::{NewTask, SubTaskId, Task, TaskFilter, TaskId};
use super::search::filter_tasks;
use crate::{Error, Result};

/// Serialized shape: `{ "tasks": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Highest task id present, used to seed id generation
    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|t| t.id).max()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        filter_tasks(&self.tasks, filter)
    }

    pub fn create(&mut self, new_task: NewTask, ids: &IdGenerator) -> Result<Task> {
        let exhausted = || Error::Storage("task id space exhausted".to_string());
        let mut id = ids.next_id().ok_or_else(exhausted)?;
        while self.get(id).is_some() {
            id = ids.next_id().ok_or_else(exhausted)?;
        }
        let task = new_task.into_task(id);
        self.tasks.push(task.clone());
        debug!(task_id = id, "Task appended");
        Ok(task)
    }

    pub fn update(&mut self, task: Task) -> Result<Task> {
        let Some(index) = self.position(task.id) else {
            warn!(task_id = task.id, "Update for unknown task");
            return Err(Error::TaskNotFound(task.id));
        };
        self.tasks[index] = task.clone();
        Ok(task)
    }

    pub fn delete_task(&mut self, id: TaskId) -> Result<TaskId> {
        let Some(index) = self.position(id) else {
            warn!(task_id = id, "Delete for unknown task");
            return Err(Error::TaskNotFound(id));
        };
        let removed = self.tasks.remove(index);
        debug!(task_id = id, subtasks = removed.sub_tasks.len(), "Task removed");
        Ok(id)
    }

    pub fn update_subtask_status(
        &mut self,
        task_id: TaskId,
        subtask_id: SubTaskId,
        is_completed: bool,
    ) -> Result<Task> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Err(Error::TaskNotFound(task_id));
        };
        let Some(subtask) = task.subtask_mut(subtask_id) else {
            return Err(Error::SubTaskNotFound {
                task_id,
                subtask_id,
            });
        };
        subtask.is_completed = is_completed;
        Ok(task.clone())
    }

    /// Unknown task or subtask ids leave the document unchanged
    pub fn delete_subtask(&mut self, task_id: TaskId, subtask_id: SubTaskId) -> SubTaskId {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            let before = task.sub_tasks.len();
            task.sub_tasks.retain(|s| s.id != subtask_id);
            if task.sub_tasks.len() == before {
                debug!(task_id, subtask_id, "No subtask to delete");
            }
        } else {
            debug!(task_id, subtask_id, "No task to delete subtask from");
        }
        subtask_id
    }

    /// Unknown task ids leave the document unchanged
    pub fn update_task_completion(&mut self, task_id: TaskId, is_completed: bool) -> TaskId {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => task.set_completion(is_completed),
            None => debug!(task_id, "No task to update completion for"),
        }
        task_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::SubTask;

    fn document_with_subtasks() -> (TaskDocument, TaskId) {
        let ids = IdGenerator::new();
        let mut doc = TaskDocument::new();
        let mut task = doc.create(NewTask::new("Task B"), &ids).unwrap();
        task.sub_tasks.push(SubTask::new(1, "S1"));
        task.sub_tasks.push(SubTask::new(2, "S2"));
        let id = task.id;
        doc.update(task).unwrap();
        (doc, id)
    }

    #[test]
    fn test_create_skips_taken_ids() {
        let ids = IdGenerator::new();
        let mut doc = TaskDocument::new();
        let first = doc.create(NewTask::new("One"), &ids).unwrap();

        let replay = IdGenerator::starting_after(first.id - 1);
        let second = doc.create(NewTask::new("Two"), &replay).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(doc.tasks.len(), 2);
    }

    #[test]
    fn test_create_fails_when_ids_run_out() {
        let mut doc = TaskDocument::from_tasks(vec![NewTask::new("Last").into_task(u64::MAX)]);
        let ids = IdGenerator::starting_after(doc.max_id().unwrap());

        match doc.create(NewTask::new("Overflow"), &ids).unwrap_err() {
            Error::Storage(msg) => assert!(msg.contains("exhausted")),
            e => panic!("Expected Storage error, got: {:?}", e),
        }
        assert_eq!(doc.tasks.len(), 1);
    }

    #[test]
    fn test_subtask_not_found_is_distinct() {
        let (mut doc, id) = document_with_subtasks();

        match doc.update_subtask_status(id, 99, true).unwrap_err() {
            Error::SubTaskNotFound {
                task_id,
                subtask_id,
            } => {
                assert_eq!(task_id, id);
                assert_eq!(subtask_id, 99);
            }
            e => panic!("Expected SubTaskNotFound error, got: {:?}", e),
        }

        match doc.update_subtask_status(id + 1, 1, true).unwrap_err() {
            Error::TaskNotFound(missing) => assert_eq!(missing, id + 1),
            e => panic!("Expected TaskNotFound error, got: {:?}", e),
        }
    }

    #[test]
    fn test_no_op_operations_leave_document_untouched() {
        let (mut doc, id) = document_with_subtasks();
        let snapshot = doc.clone();

        assert_eq!(doc.delete_subtask(id + 1, 1), 1);
        assert_eq!(doc.delete_subtask(id, 99), 99);
        assert_eq!(doc.update_task_completion(id + 1, true), id + 1);
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_document_json_shape() {
        let (doc, _) = document_with_subtasks();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["tasks"].as_array().unwrap().len(), 1);
        assert_eq!(value["tasks"][0]["subTasks"][1]["name"], "S2");

        let empty: TaskDocument = serde_json::from_str("{}").unwrap();
        assert!(empty.tasks.is_empty());
    }
}
