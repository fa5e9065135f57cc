//! Behaviour shared by every `TaskRepository` implementation, run against
//! each store from its own test module.

use super::model::{NewTask, SubTask, Task, TaskFilter, TaskPriority};
use super::repository::TaskRepository;
use crate::Error;

async fn task_with_subtasks(store: &dyn TaskRepository, name: &str, subtasks: &[&str]) -> Task {
    let mut task = store
        .create(NewTask::new(name).with_description(format!("{} description", name)))
        .await
        .unwrap();
    for (index, subtask) in subtasks.iter().enumerate() {
        task.sub_tasks.push(
            SubTask::new(index as u64 + 1, *subtask)
                .with_description(format!("{} notes", subtask))
                .with_assignees(["ann", "bob"]),
        );
    }
    store.update(task).await.unwrap()
}

async fn all(store: &dyn TaskRepository) -> Vec<Task> {
    store.list(&TaskFilter::default()).await.unwrap()
}

pub async fn create_then_list(store: &dyn TaskRepository) {
    let first = store
        .create(NewTask::new("Task 1").with_priority(TaskPriority::Medium))
        .await
        .unwrap();
    let second = store.create(NewTask::new("Task 2")).await.unwrap();

    assert!(!first.is_completed);
    assert!(first.sub_tasks.is_empty());
    assert_ne!(first.id, second.id);

    let tasks = all(store).await;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0], first);
    assert_eq!(tasks[1], second);

    let fetched = store.get(first.id).await.unwrap();
    assert_eq!(fetched, Some(first));
}

pub async fn search(store: &dyn TaskRepository) {
    let release = task_with_subtasks(store, "Release", &["Changelog", "Tag build"]).await;
    let groceries = task_with_subtasks(store, "Groceries", &["Milk run"]).await;
    let bare = store.create(NewTask::new("Bare")).await.unwrap();

    let ids = |tasks: Vec<Task>| tasks.into_iter().map(|t| t.id).collect::<Vec<_>>();

    // "Bare" has no description, so it matches every term
    let found = store.list(&TaskFilter::search("CHANGELOG")).await.unwrap();
    assert_eq!(ids(found.clone()), vec![release.id, bare.id]);
    assert_eq!(found[0].sub_tasks.len(), 2);

    let found = store.list(&TaskFilter::search("  milk ")).await.unwrap();
    assert_eq!(ids(found), vec![groceries.id, bare.id]);

    let found = store.list(&TaskFilter::search("   ")).await.unwrap();
    assert_eq!(found.len(), 3);
}

pub async fn update(store: &dyn TaskRepository) {
    let mut task = store.create(NewTask::new("Original")).await.unwrap();
    task.name = "Renamed".to_string();
    task.priority = TaskPriority::High;
    task.sub_tasks.push(SubTask::new(5, "Added later"));

    let updated = store.update(task.clone()).await.unwrap();
    assert_eq!(updated, task);
    assert_eq!(store.get(task.id).await.unwrap(), Some(task.clone()));

    let mut ghost = task.clone();
    ghost.id += 1_000;
    match store.update(ghost.clone()).await.unwrap_err() {
        Error::TaskNotFound(id) => assert_eq!(id, ghost.id),
        e => panic!("Expected TaskNotFound error, got: {:?}", e),
    }
}

pub async fn delete_task(store: &dyn TaskRepository) {
    let doomed = task_with_subtasks(store, "Doomed", &["Child"]).await;
    let kept = store.create(NewTask::new("Kept")).await.unwrap();

    assert_eq!(store.delete_task(doomed.id).await.unwrap(), doomed.id);
    assert_eq!(all(store).await, vec![kept]);

    assert!(matches!(
        store.delete_task(doomed.id).await,
        Err(Error::TaskNotFound(_))
    ));
    assert!(matches!(
        store.update(doomed.clone()).await,
        Err(Error::TaskNotFound(_))
    ));
    assert!(matches!(
        store.update_subtask_status(doomed.id, 1, true).await,
        Err(Error::TaskNotFound(_))
    ));
}

pub async fn subtask_status(store: &dyn TaskRepository) {
    let task = task_with_subtasks(store, "Task B", &["S1", "S2"]).await;

    let returned = store.update_subtask_status(task.id, 1, true).await.unwrap();
    assert!(!returned.is_completed);
    assert!(returned.sub_tasks[0].is_completed);
    assert!(!returned.sub_tasks[1].is_completed);

    let listed = all(store).await;
    assert_eq!(listed, vec![returned]);

    // all subtasks done does not complete the task
    store.update_subtask_status(task.id, 2, true).await.unwrap();
    let listed = store.get(task.id).await.unwrap().unwrap();
    assert_eq!(listed.completed_subtasks(), 2);
    assert!(!listed.is_completed);

    assert!(matches!(
        store.update_subtask_status(task.id, 42, true).await,
        Err(Error::SubTaskNotFound { .. })
    ));
}

pub async fn delete_subtask(store: &dyn TaskRepository) {
    let target = task_with_subtasks(store, "Target", &["One", "Two", "Three"]).await;
    let other = task_with_subtasks(store, "Other", &["One", "Two"]).await;
    store.update_task_completion(target.id, true).await.unwrap();

    assert_eq!(store.delete_subtask(target.id, 2).await.unwrap(), 2);

    let target_after = store.get(target.id).await.unwrap().unwrap();
    let names: Vec<_> = target_after.sub_tasks.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Three"]);
    assert!(target_after.is_completed);
    assert_eq!(store.get(other.id).await.unwrap(), Some(other.clone()));

    let before = all(store).await;
    assert_eq!(store.delete_subtask(target.id + other.id, 1).await.unwrap(), 1);
    assert_eq!(store.delete_subtask(target.id, 77).await.unwrap(), 77);
    assert_eq!(all(store).await, before);
}

pub async fn completion_cascade(store: &dyn TaskRepository) {
    let task = task_with_subtasks(store, "Task 1", &["S1", "S2", "S3"]).await;
    store.update_subtask_status(task.id, 2, true).await.unwrap();

    assert_eq!(store.update_task_completion(task.id, true).await.unwrap(), task.id);
    let done = store.get(task.id).await.unwrap().unwrap();
    assert!(done.is_completed);
    assert!(done.sub_tasks.iter().all(|s| s.is_completed));

    store.update_task_completion(task.id, false).await.unwrap();
    let reopened = store.get(task.id).await.unwrap().unwrap();
    assert!(!reopened.is_completed);
    assert!(reopened.sub_tasks.iter().all(|s| !s.is_completed));

    let before = all(store).await;
    let missing = task.id + 1_000;
    assert_eq!(store.update_task_completion(missing, true).await.unwrap(), missing);
    assert_eq!(all(store).await, before);
}
