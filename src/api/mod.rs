pub mod dto;
pub mod handlers;

use crate::app_state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/chat", post(handlers::chat))
        .route("/api/map/locations", get(handlers::locations))
        .with_state(state)
}
