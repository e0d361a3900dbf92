//! Inference pipeline for the two-headed categorization model.
//!
//! The model directory must contain `model.onnx` and `tokenizer.json`. The
//! graph takes BERT-style `input_ids` / `attention_mask` / `token_type_ids`
//! and emits two softmax heads, one per taxonomy.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use crate::error::ApiError;
use crate::model::loader;

/// Output head names baked into the exported graph.
pub const MAIN_OUTPUT: &str = "main_category_output";
pub const SUB_OUTPUT: &str = "subcategory_output";

/// Token budget per input; longer feedback is truncated, not rejected.
const MAX_SEQ_LEN: usize = 256;

/// Raw per-head probabilities for one input text, each in [0, 1].
#[derive(Debug, Clone)]
pub struct HeadProbabilities {
    pub main: Vec<f32>,
    pub sub: Vec<f32>,
}

/// Inference seam: anything that can score one text against both heads.
///
/// The production implementation wraps an ONNX session; tests substitute
/// a scripted implementation to exercise the handlers without a model.
pub trait Categorizer: Send + Sync {
    fn predict(&self, text: &str) -> Result<HeadProbabilities, ApiError>;
}

/// ONNX-backed categorizer.
///
/// `Session::run` needs `&mut self`, so the session sits behind a `Mutex`;
/// requests serialize on inference.
pub struct OnnxCategorizer {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl OnnxCategorizer {
    /// Load the model and its tokenizer from a directory containing
    /// `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path) -> Result<Self, ApiError> {
        let session = loader::load_session(model_dir.join("model.onnx"))?;

        let tokenizer_path = model_dir.join("tokenizer.json");
        if !tokenizer_path.exists() {
            return Err(ApiError::TokenizerNotFound(
                tokenizer_path.display().to_string(),
            ));
        }

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ApiError::Tokenizer(e.to_string()))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| ApiError::Tokenizer(e.to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }
}

impl Categorizer for OnnxCategorizer {
    fn predict(&self, text: &str) -> Result<HeadProbabilities, ApiError> {
        // Tokenize as a single-element batch.
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ApiError::Tokenizer(e.to_string()))?;

        let seq_len = encoding.get_ids().len();

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding
            .get_type_ids()
            .iter()
            .map(|&t| t as i64)
            .collect();

        let shape = [1i64, seq_len as i64];

        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))?;
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))?;

        let mut session = self.session.lock().unwrap();
        let outputs = session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
            "token_type_ids" => type_tensor,
        ])?;

        let extract = |name: &'static str| -> Result<Vec<f32>, ApiError> {
            let value = outputs.get(name).ok_or(ApiError::MissingOutput(name))?;
            let (shape, data) = value.try_extract_tensor::<f32>()?;
            let dims: &[i64] = shape;
            if dims.len() != 2 || dims[0] != 1 {
                return Err(ApiError::UnexpectedOutputShape {
                    name,
                    dims: dims.to_vec(),
                });
            }
            Ok(data.to_vec())
        };

        Ok(HeadProbabilities {
            main: extract(MAIN_OUTPUT)?,
            sub: extract(SUB_OUTPUT)?,
        })
    }
}

/// Pair raw head probabilities with their labels, scale to percentages, and
/// sort descending.
///
/// The i-th probability belongs to the i-th label; a length mismatch means
/// the label files do not match the deployed model and is an error.
pub fn rank(probs: &[f32], labels: &[String]) -> Result<Vec<(String, f32)>, ApiError> {
    if probs.len() != labels.len() {
        return Err(ApiError::LabelCountMismatch {
            labels: labels.len(),
            outputs: probs.len(),
        });
    }

    let mut ranked: Vec<(String, f32)> = labels
        .iter()
        .zip(probs)
        .map(|(label, &p)| (label.clone(), p * 100.0))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    Ok(ranked)
}
