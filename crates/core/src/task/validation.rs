//! Boundary validation
//!
//! The stores accept whatever they are given. Callers that take input from
//! outside (the HTTP layer) run these checks before invoking a mutation.

use std::collections::HashSet;

use super::model::{NewTask, SubTask, Task};
use crate::{Error, Result};

/// Minimum length of task and subtask names, in characters, after trimming
pub const MIN_NAME_LEN: usize = 3;

fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(Error::Validation(format!(
            "{} name must be at least {} characters",
            kind, MIN_NAME_LEN
        )));
    }
    Ok(())
}

fn check_subtask(subtask: &SubTask) -> Result<()> {
    check_name("Subtask", &subtask.name)?;
    if subtask.description.trim().is_empty() {
        return Err(Error::Validation(format!(
            "Subtask {}: description is required",
            subtask.id
        )));
    }
    if subtask.assignees.iter().all(|a| a.trim().is_empty()) {
        return Err(Error::Validation(format!(
            "Subtask {}: at least one assignee is required",
            subtask.id
        )));
    }
    Ok(())
}

/// Validate a create payload
pub fn validate_new_task(new_task: &NewTask) -> Result<()> {
    check_name("Task", &new_task.name)
}

/// Validate a full task before it replaces the stored one
pub fn validate_task(task: &Task) -> Result<()> {
    check_name("Task", &task.name)?;

    let mut seen = HashSet::new();
    for subtask in &task.sub_tasks {
        if !seen.insert(subtask.id) {
            return Err(Error::Validation(format!(
                "Duplicate subtask id {} in task {}",
                subtask.id, task.id
            )));
        }
        check_subtask(subtask)?;
    }
    Ok(())
}

/// Split a comma separated assignee list, dropping blank entries
pub fn parse_assignees(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}
