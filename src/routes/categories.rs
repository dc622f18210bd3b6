use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::ApiError;
use crate::models::{Category, CategoryPatch, NewCategory};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete_one))
}

/// A path segment that is not a number cannot name any category.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::CategoryNotFound)
}

async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Category>>, ApiError> {
    state
        .categories
        .list()
        .map(Json)
        .map_err(ApiError::category)
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&id)?;
    state
        .categories
        .get(id)
        .map(Json)
        .map_err(ApiError::category)
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let created = state.categories.create(body).map_err(ApiError::category)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&id)?;
    state
        .categories
        .update(id, patch)
        .map(Json)
        .map_err(ApiError::category)
}

async fn delete_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&id)?;
    state
        .categories
        .delete(id)
        .map(Json)
        .map_err(ApiError::category)
}
