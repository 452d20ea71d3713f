use anyhow::{Context, Result};
use moss_contract::PredictionSettings;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_FILE: &str = "best_model.onnx";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_MODEL_INFO_FILE: &str = "model_info.json";

/// Everything the service needs at startup, built once in `main`.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub model_dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
    pub model_info_file: String,
    pub settings: PredictionSettings,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            workers: num_cpus::get(),
            model_dir: PathBuf::from("."),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
            model_info_file: DEFAULT_MODEL_INFO_FILE.to_string(),
            settings: PredictionSettings::default(),
        }
    }
}

impl ServiceConfig {
    /// Reads `HOST`, `PORT`, `WORKERS`, `MODEL_DIR`, `MODEL_FILE`,
    /// `SCALER_FILE` and `MODEL_INFO_FILE`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            None => defaults.port,
        };

        // A bad WORKERS value is not worth refusing to start over.
        let workers = lookup("WORKERS")
            .and_then(|w| w.parse().ok())
            .filter(|w: &usize| *w > 0)
            .unwrap_or(defaults.workers);

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            workers,
            model_dir: lookup("MODEL_DIR").map(PathBuf::from).unwrap_or(defaults.model_dir),
            model_file: lookup("MODEL_FILE").unwrap_or(defaults.model_file),
            scaler_file: lookup("SCALER_FILE").unwrap_or(defaults.scaler_file),
            model_info_file: lookup("MODEL_INFO_FILE").unwrap_or(defaults.model_info_file),
            settings: defaults.settings,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.model_dir.join(&self.scaler_file)
    }

    pub fn model_info_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_info_file)
    }
}
