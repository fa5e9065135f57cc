//! Task API endpoints
//!
//! RESTful API over the task repository. Input is validated here, before
//! any mutation reaches the store.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskdesk_core::task::validation::{parse_assignees, validate_new_task, validate_task};
use taskdesk_core::task::{NewTask, SubTask, SubTaskId, Task, TaskFilter, TaskId, TaskPriority};
use taskdesk_core::Error;

use crate::state::AppState;

type RouteError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Assignees arrive either as a list or as the comma separated form text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AssigneesField {
    List(Vec<String>),
    Text(String),
}

impl Default for AssigneesField {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl AssigneesField {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(list) => list.into_iter().map(|a| a.trim().to_string()).collect(),
            Self::Text(text) => parse_assignees(&text),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTaskRequest {
    pub id: SubTaskId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignees: AssigneesField,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub is_completed: bool,
}

/// Full replacement of a task, including its subtasks
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub sub_tasks: Vec<SubTaskRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[serde(flatten)]
    pub task: Task,
    /// Everyone assigned to a subtask, without duplicates
    pub assignees: Vec<String>,
    pub completed_subtasks: usize,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        let assignees = task.assignees().into_iter().map(str::to_string).collect();
        let completed_subtasks = task.completed_subtasks();
        Self {
            task,
            assignees,
            completed_subtasks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn required_date(value: Option<DateTime<Utc>>, what: &str) -> taskdesk_core::Result<DateTime<Utc>> {
    value.ok_or_else(|| Error::Validation(format!("{} is required", what)))
}

impl CreateTaskRequest {
    fn into_new_task(self) -> taskdesk_core::Result<NewTask> {
        Ok(NewTask {
            name: self.name,
            description: self.description,
            priority: self.priority,
            start_date: required_date(self.start_date, "Start date")?,
            due_date: required_date(self.due_date, "Due date")?,
        })
    }
}

impl SubTaskRequest {
    fn into_subtask(self) -> taskdesk_core::Result<SubTask> {
        Ok(SubTask {
            id: self.id,
            name: self.name,
            description: self.description,
            assignees: self.assignees.into_vec(),
            start_date: required_date(self.start_date, "Subtask start date")?,
            due_date: required_date(self.due_date, "Subtask due date")?,
            priority: self.priority,
            is_completed: self.is_completed,
        })
    }
}

impl UpdateTaskRequest {
    fn into_task(self, id: TaskId) -> taskdesk_core::Result<Task> {
        Ok(Task {
            id,
            name: self.name,
            description: self.description,
            priority: self.priority,
            start_date: required_date(self.start_date, "Start date")?,
            due_date: required_date(self.due_date, "Due date")?,
            is_completed: self.is_completed,
            sub_tasks: self
                .sub_tasks
                .into_iter()
                .map(SubTaskRequest::into_subtask)
                .collect::<taskdesk_core::Result<_>>()?,
        })
    }
}

fn error_response(error: Error) -> RouteError {
    let status = match &error {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("Task store failure: {}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks?search= - List tasks, optionally filtered
async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<TaskResponse>>, RouteError> {
    let tasks = state
        .task_store()
        .list(&filter)
        .await
        .map_err(error_response)?;
    tracing::debug!(search = ?filter.search, count = tasks.len(), "Listed tasks");

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), RouteError> {
    let new_task = req.into_new_task().map_err(error_response)?;
    validate_new_task(&new_task).map_err(error_response)?;

    let created = state
        .task_store()
        .create(new_task)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(created))))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskResponse>, RouteError> {
    match state.task_store().get(id).await.map_err(error_response)? {
        Some(task) => Ok(Json(TaskResponse::from(task))),
        None => Err(error_response(Error::TaskNotFound(id))),
    }
}

/// PUT /api/tasks/{id} - Replace a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, RouteError> {
    let task = req.into_task(id).map_err(error_response)?;
    validate_task(&task).map_err(error_response)?;

    let updated = state
        .task_store()
        .update(task)
        .await
        .map_err(error_response)?;

    Ok(Json(TaskResponse::from(updated)))
}

/// DELETE /api/tasks/{id} - Delete a task and its subtasks
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<IdResponse>, RouteError> {
    let id = state
        .task_store()
        .delete_task(id)
        .await
        .map_err(error_response)?;

    Ok(Json(IdResponse { id }))
}

/// PATCH /api/tasks/{id}/completion - Complete or reopen a task and all subtasks
async fn update_task_completion(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(req): Json<CompletionRequest>,
) -> Result<Json<IdResponse>, RouteError> {
    let id = state
        .task_store()
        .update_task_completion(id, req.is_completed)
        .await
        .map_err(error_response)?;

    Ok(Json(IdResponse { id }))
}

/// PATCH /api/tasks/{id}/subtasks/{subtask_id} - Toggle one subtask
async fn update_subtask_status(
    State(state): State<AppState>,
    Path((task_id, subtask_id)): Path<(TaskId, SubTaskId)>,
    Json(req): Json<CompletionRequest>,
) -> Result<Json<TaskResponse>, RouteError> {
    let task = state
        .task_store()
        .update_subtask_status(task_id, subtask_id, req.is_completed)
        .await
        .map_err(error_response)?;

    Ok(Json(TaskResponse::from(task)))
}

/// DELETE /api/tasks/{id}/subtasks/{subtask_id} - Remove one subtask
async fn delete_subtask(
    State(state): State<AppState>,
    Path((task_id, subtask_id)): Path<(TaskId, SubTaskId)>,
) -> Result<Json<IdResponse>, RouteError> {
    let id = state
        .task_store()
        .delete_subtask(task_id, subtask_id)
        .await
        .map_err(error_response)?;

    Ok(Json(IdResponse { id }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/completion", patch(update_task_completion))
        .route(
            "/api/tasks/{id}/subtasks/{subtask_id}",
            patch(update_subtask_status).delete(delete_subtask),
        )
}
