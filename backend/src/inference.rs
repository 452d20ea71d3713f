use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tract_onnx::prelude::*;

use crate::config::ServiceConfig;
use crate::error::ArtifactError;
use crate::models::ModelInfo;

pub const FEATURE_COUNT: usize = 4;

/// Fitted preprocessing step applied before the regressor.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: [f32; FEATURE_COUNT]) -> anyhow::Result<[f32; FEATURE_COUNT]>;
}

/// Trained model: four scaled features in, growth days out.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: [f32; FEATURE_COUNT]) -> anyhow::Result<f32>;
}

#[derive(Deserialize)]
struct ScalerFile {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// `(x - mean) / scale`, with parameters exported from the training run.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f32; FEATURE_COUNT],
    scale: [f32; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: [f32; FEATURE_COUNT], scale: [f32; FEATURE_COUNT]) -> Result<Self, String> {
        if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(format!("scale[{}] must be finite and non-zero", i));
        }
        if mean.iter().any(|m| !m.is_finite()) {
            return Err("mean must be finite".to_string());
        }
        Ok(Self { mean, scale })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file: ScalerFile = read_json(path)?;
        let mean = to_features(&file.mean)
            .ok_or_else(|| invalid(path, format!("expected {} means", FEATURE_COUNT)))?;
        let scale = to_features(&file.scale)
            .ok_or_else(|| invalid(path, format!("expected {} scales", FEATURE_COUNT)))?;
        Self::new(mean, scale).map_err(|e| invalid(path, e))
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: [f32; FEATURE_COUNT]) -> anyhow::Result<[f32; FEATURE_COUNT]> {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, value) in features.iter().enumerate() {
            scaled[i] = (value - self.mean[i]) / self.scale[i];
        }
        Ok(scaled)
    }
}

/// Regressor exported to ONNX and run through tract.
pub struct OnnxRegressor {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
}

impl OnnxRegressor {
    pub fn load<P: AsRef<Path>>(model_path: P) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_COUNT)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: [f32; FEATURE_COUNT]) -> anyhow::Result<f32> {
        let input_tensor = Tensor::from_shape(&[1, FEATURE_COUNT], &features[..])?;
        let outputs = self.model.run(tvec!(input_tensor.into()))?;

        let value = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("Model returned no outputs"))?
            .to_array_view::<f32>()?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Model returned an empty tensor"))?;

        Ok(value)
    }
}

impl ModelInfo {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let info: ModelInfo = read_json(path)?;
        if info.features.len() != FEATURE_COUNT {
            return Err(invalid(
                path,
                format!(
                    "expected {} features, found {}",
                    FEATURE_COUNT,
                    info.features.len()
                ),
            ));
        }
        Ok(info)
    }
}

/// Loaded artifacts, ready to be wrapped in a predictor.
pub struct Artifacts {
    pub scaler: StandardScaler,
    pub regressor: OnnxRegressor,
    pub info: ModelInfo,
}

/// Checks all three files exist before loading any of them, so a broken
/// deployment reports everything that is missing at once.
pub fn load_artifacts(config: &ServiceConfig) -> Result<Artifacts, ArtifactError> {
    let model_path = config.model_path();
    let scaler_path = config.scaler_path();
    let info_path = config.model_info_path();

    check_files(&[&model_path, &scaler_path, &info_path])?;

    let info = ModelInfo::load(&info_path)?;
    let scaler = StandardScaler::load(&scaler_path)?;
    let regressor = OnnxRegressor::load(&model_path)
        .map_err(|e| ArtifactError::Onnx(model_path.clone(), format!("{:#}", e)))?;

    Ok(Artifacts {
        scaler,
        regressor,
        info,
    })
}

fn check_files(paths: &[&PathBuf]) -> Result<(), ArtifactError> {
    let missing: Vec<String> = paths
        .iter()
        .filter(|p| !p.is_file())
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ArtifactError::Missing(missing))
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|e| ArtifactError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| ArtifactError::Json(path.to_path_buf(), e))
}

fn to_features(values: &[f32]) -> Option<[f32; FEATURE_COUNT]> {
    values.try_into().ok()
}

fn invalid(path: &Path, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid(path.to_path_buf(), reason.into())
}
