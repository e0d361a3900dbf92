use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::model::predictor::{rank, Categorizer};
use crate::server::types::*;

const SERVICE_NAME: &str = "FCR Feedback Categorization API";

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "online",
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model.is_some(),
        main_classes_count: state.main_classes.len(),
        sub_classes_count: state.sub_classes.len(),
    })
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let model = state.model.as_deref().ok_or(ApiError::ModelNotLoaded)?;

    if payload.text.trim().is_empty() {
        return Err(ApiError::EmptyText);
    }

    run_prediction(model, &state, &payload.text).map(Json)
}

pub async fn predict_bulk(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkPredictRequest>,
) -> Result<Json<BulkPredictResponse>, ApiError> {
    let model = state.model.as_deref().ok_or(ApiError::ModelNotLoaded)?;

    if payload.texts.is_empty() {
        return Err(ApiError::EmptyBatch);
    }

    // One result per input, in input order. A failed item becomes the
    // sentinel entry instead of failing the whole batch.
    let mut predictions = Vec::with_capacity(payload.texts.len());
    for text in &payload.texts {
        match run_prediction(model, &state, text) {
            Ok(prediction) => predictions.push(prediction),
            Err(err) => {
                warn!(%err, "bulk item failed, substituting sentinel entry");
                predictions.push(PredictionResponse::error_sentinel());
            }
        }
    }

    Ok(Json(BulkPredictResponse { predictions }))
}

pub async fn categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    if state.main_classes.is_empty() || state.sub_classes.is_empty() {
        return Err(ApiError::ClassesNotLoaded);
    }

    Ok(Json(CategoriesResponse {
        main_categories: state.main_classes.clone(),
        sub_categories: state.sub_classes.clone(),
    }))
}

/// Score one text and assemble the doubly-ranked response.
fn run_prediction(
    model: &dyn Categorizer,
    state: &AppState,
    text: &str,
) -> Result<PredictionResponse, ApiError> {
    let probs = model.predict(text)?;

    let main = rank(&probs.main, &state.main_classes)?;
    let sub = rank(&probs.sub, &state.sub_classes)?;

    Ok(PredictionResponse {
        main_predictions: into_results(main),
        sub_predictions: into_results(sub),
    })
}

fn into_results(ranked: Vec<(String, f32)>) -> Vec<PredictionResult> {
    ranked
        .into_iter()
        .map(|(label, probability)| PredictionResult { label, probability })
        .collect()
}
