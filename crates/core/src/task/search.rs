//! Task search
//!
//! A search term selects whole tasks. A task matches when the term is a
//! case-insensitive substring of its name, its description, or the name or
//! description of any of its subtasks. A missing or empty text field counts
//! as a match.

use super::model::{Task, TaskFilter};

/// Normalize a raw search term. Blank terms mean "no filter".
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn text_matches(text: Option<&str>, needle: &str) -> bool {
    match text {
        None | Some("") => true,
        Some(text) => text.to_lowercase().contains(needle),
    }
}

/// Check a task against an already normalized term
pub fn task_matches(task: &Task, needle: &str) -> bool {
    text_matches(Some(task.name.as_str()), needle)
        || text_matches(task.description.as_deref(), needle)
        || task.sub_tasks.iter().any(|s| {
            text_matches(Some(s.name.as_str()), needle) || text_matches(Some(s.description.as_str()), needle)
        })
}

/// Apply a filter to a sequence of tasks, keeping their order
pub fn filter_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    filter: &TaskFilter,
) -> Vec<Task> {
    let needle = filter.search.as_deref().and_then(normalize_term);
    tasks
        .into_iter()
        .filter(|task| match &needle {
            Some(needle) => task_matches(task, needle),
            None => true,
        })
        .cloned()
        .collect()
}
