//! Demo data for an empty store

use chrono::{DateTime, Utc};

use super::model::{SubTask, Task, TaskPriority};

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Two sample tasks: one open with an open subtask, one completed
pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1742893758713,
            name: "Task 1 ".to_string(),
            description: Some("Task 1 desc".to_string()),
            priority: TaskPriority::Medium,
            start_date: at(1742893725648),
            due_date: at(1742893725648),
            is_completed: false,
            sub_tasks: vec![SubTask {
                start_date: at(1742893743596),
                due_date: at(1742893743596),
                ..SubTask::new(1742893743596, "Sub task 1")
                    .with_description("desc")
                    .with_assignees(["a", "b", "c"])
            }],
        },
        Task {
            id: 1742893783474,
            name: "Task 2".to_string(),
            description: Some("task 2 desc".to_string()),
            priority: TaskPriority::Medium,
            start_date: at(1742893762131),
            due_date: at(1742893762131),
            is_completed: true,
            sub_tasks: vec![SubTask {
                start_date: at(1742893769946),
                due_date: at(1742893769946),
                ..SubTask::new(1742893769946, "subtask 1")
                    .with_description("desc")
                    .with_assignees(["d", "f", "e"])
                    .with_priority(TaskPriority::Low)
                    .with_completed(true)
            }],
        },
    ]
}
