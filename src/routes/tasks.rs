use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::ApiError;
use crate::models::{NewTask, Task, TaskPatch};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete_one))
}

async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    state.tasks.list().map(Json).map_err(ApiError::task)
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    state.tasks.get(&id).map(Json).map_err(ApiError::task)
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let created = state.tasks.create(body).map_err(ApiError::task)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    state
        .tasks
        .update(&id, patch)
        .map(Json)
        .map_err(ApiError::task)
}

async fn delete_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    state.tasks.delete(&id).map(Json).map_err(ApiError::task)
}
