//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task identifier, derived from the creation timestamp in milliseconds
pub type TaskId = u64;

/// Subtask identifier, unique within its parent task
pub type SubTaskId = u64;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A unit of work belonging to exactly one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: SubTaskId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub is_completed: bool,
}

impl SubTask {
    /// Create an open subtask whose start and due dates are now
    pub fn new(id: SubTaskId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            assignees: Vec::new(),
            start_date: now,
            due_date: now,
            priority: TaskPriority::default(),
            is_completed: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the assignees
    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = assignees.into_iter().map(Into::into).collect();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the completion flag
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Assignees with duplicates removed, in first-seen order
    pub fn unique_assignees(&self) -> Vec<&str> {
        dedup_names(self.assignees.iter())
    }
}

/// A top-level trackable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

impl Task {
    /// Find a subtask by id for mutation
    pub fn subtask_mut(&mut self, subtask_id: SubTaskId) -> Option<&mut SubTask> {
        self.sub_tasks.iter_mut().find(|s| s.id == subtask_id)
    }

    /// Everyone assigned to any subtask, duplicates removed, in first-seen order
    pub fn assignees(&self) -> Vec<&str> {
        dedup_names(self.sub_tasks.iter().flat_map(|s| s.assignees.iter()))
    }

    /// Number of subtasks currently marked completed
    pub fn completed_subtasks(&self) -> usize {
        self.sub_tasks.iter().filter(|s| s.is_completed).count()
    }

    /// Force the task flag and every subtask flag to `is_completed`
    pub fn set_completion(&mut self, is_completed: bool) {
        self.is_completed = is_completed;
        for subtask in &mut self.sub_tasks {
            subtask.is_completed = is_completed;
        }
    }
}

fn dedup_names<'a>(names: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        let name = name.as_str();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Fields accepted when creating a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: TaskPriority,
}

impl NewTask {
    /// Create a new task payload whose start and due dates are now
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: None,
            start_date: now,
            due_date: now,
            priority: TaskPriority::default(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the start and due dates
    pub fn with_dates(mut self, start_date: DateTime<Utc>, due_date: DateTime<Utc>) -> Self {
        self.start_date = start_date;
        self.due_date = due_date;
        self
    }

    /// Turn the payload into an open task with no subtasks
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            name: self.name,
            description: self.description,
            priority: self.priority,
            start_date: self.start_date,
            due_date: self.due_date,
            is_completed: false,
            sub_tasks: Vec::new(),
        }
    }
}

/// Query parameters for listing tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub search: Option<String>,
}

impl TaskFilter {
    /// Filter on a search term
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }
}
