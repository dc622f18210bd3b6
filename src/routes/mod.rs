use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub mod categories;
pub mod tasks;

/// Assemble the full application router: liveness at the root plus the two
/// resource collections, with permissive CORS for browser clients.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .nest("/api/categories", categories::router())
        .nest("/api/tasks", tasks::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "To-Do List API running"
}
