use std::path::Path;

use ort::session::{builder::GraphOptimizationLevel, Session};
use tracing::info;

use crate::error::ApiError;

// Initialize the global environment for ORT (only needed once)
pub fn init_ort() -> Result<(), ApiError> {
    ort::init().with_name("fcr-api").commit();
    Ok(())
}

/// Loads an ONNX model from disk and creates an inference session.
///
/// # Arguments
/// * `model_path` - Path to the .onnx file
pub fn load_session(model_path: impl AsRef<Path>) -> Result<Session, ApiError> {
    let path = model_path.as_ref();
    if !path.exists() {
        return Err(ApiError::ModelNotFound(path.display().to_string()));
    }

    // Configure Session
    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(4)?
        .commit_from_file(path)?;

    info!(model = %path.display(), "loaded ONNX session");

    Ok(session)
}
