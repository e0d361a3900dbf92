use crate::server::{handlers, types::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    // Mirrors any origin and allows credentials so the frontend can talk to
    // us from anywhere; deployments are expected to tighten this to their
    // own domain.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/predict/bulk", post(handlers::predict_bulk))
        .route("/categories", get(handlers::categories))
        .layer(cors)
        .with_state(state)
}
