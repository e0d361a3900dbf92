use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::predictor::Categorizer;

/// Shared Application State
///
/// Written once during startup, read-only afterwards. `model` is `None`
/// only when the loader has not run (tests, degraded probes); startup
/// aborts rather than serving with a missing model.
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<dyn Categorizer>>,
    pub main_classes: Vec<String>,
    pub sub_classes: Vec<String>,
}

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: String,
    pub probability: f32,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub main_predictions: Vec<PredictionResult>,
    pub sub_predictions: Vec<PredictionResult>,
}

impl PredictionResponse {
    /// Placeholder substituted for a failed item inside a bulk batch,
    /// preserving positional alignment with the input list.
    pub fn error_sentinel() -> Self {
        let entry = || {
            vec![PredictionResult {
                label: "Error".to_string(),
                probability: 0.0,
            }]
        };
        Self {
            main_predictions: entry(),
            sub_predictions: entry(),
        }
    }
}

#[derive(Deserialize)]
pub struct BulkPredictRequest {
    pub texts: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct BulkPredictResponse {
    pub predictions: Vec<PredictionResponse>,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub main_classes_count: usize,
    pub sub_classes_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub main_categories: Vec<String>,
    pub sub_categories: Vec<String>,
}
