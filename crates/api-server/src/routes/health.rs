//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use taskdesk_core::task::TaskFilter;

use crate::config::StorageKind;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    storage: StorageKind,
    task_count: Option<usize>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let task_count = match state.task_store().list(&TaskFilter::default()).await {
        Ok(tasks) => Some(tasks.len()),
        Err(e) => {
            tracing::warn!("Health check could not read tasks: {}", e);
            None
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.storage(),
        task_count,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
