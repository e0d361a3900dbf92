use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // Startup / load failures (fatal when hit during startup)
    #[error("Model not found at path: {0}")]
    ModelNotFound(String),

    #[error("Tokenizer not found at path: {0}")]
    TokenizerNotFound(String),

    #[error("Label file not found: {0}")]
    LabelFileNotFound(String),

    #[error("Malformed label file {path}: {source}")]
    MalformedLabelFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // Prediction failures
    #[error("ONNX Runtime error: {0}")]
    Ort(#[from] ort::Error),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Model output '{0}' missing from inference results")]
    MissingOutput(&'static str),

    #[error("Unexpected output shape for '{name}': {dims:?}")]
    UnexpectedOutputShape { name: &'static str, dims: Vec<i64> },

    #[error("Prediction error: {labels} labels but {outputs} model outputs")]
    LabelCountMismatch { labels: usize, outputs: usize },

    // Request validation
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Classes not loaded")]
    ClassesNotLoaded,

    #[error("Text input cannot be empty")]
    EmptyText,

    #[error("No texts provided")]
    EmptyBatch,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::ModelNotLoaded | ApiError::ClassesNotLoaded => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::EmptyText | ApiError::EmptyBatch => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
