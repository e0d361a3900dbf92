use std::env;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_MODEL_DIR: &str = "models/categorizer";
const DEFAULT_MAIN_CLASSES: &str = "main_category_classes.json";
const DEFAULT_SUB_CLASSES: &str = "subcategory_classes.json";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Directory holding `model.onnx` and `tokenizer.json`.
    pub model_dir: PathBuf,
    pub main_classes_path: PathBuf,
    pub sub_classes_path: PathBuf,
}

impl AppConfig {
    /// Collect configuration from the environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid PORT value: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
                port,
            },
            model: ModelConfig {
                model_dir: env::var("MODEL_PATH")
                    .unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string())
                    .into(),
                main_classes_path: env::var("MAIN_CLASSES_PATH")
                    .unwrap_or_else(|_| DEFAULT_MAIN_CLASSES.to_string())
                    .into(),
                sub_classes_path: env::var("SUB_CLASSES_PATH")
                    .unwrap_or_else(|_| DEFAULT_SUB_CLASSES.to_string())
                    .into(),
            },
        })
    }
}
