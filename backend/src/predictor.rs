use log::{debug, error, info};
use moss_contract::{PredictionRequest, PredictionResponse, PredictionSettings};
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::inference::{load_artifacts, FeatureScaler, Regressor};
use crate::models::ModelInfo;

/// Validate, scale, predict, interpret. Shared read-only across workers.
pub struct Predictor {
    scaler: Box<dyn FeatureScaler>,
    regressor: Box<dyn Regressor>,
    info: ModelInfo,
    settings: PredictionSettings,
}

impl Predictor {
    pub fn new(
        scaler: Box<dyn FeatureScaler>,
        regressor: Box<dyn Regressor>,
        info: ModelInfo,
        settings: PredictionSettings,
    ) -> Self {
        Self {
            scaler,
            regressor,
            info,
            settings,
        }
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ServiceError> {
        request
            .validate(&self.settings.ranges)
            .map_err(ServiceError::Validation)?;

        let scaled = self
            .scaler
            .transform(request.to_features())
            .map_err(|e| ServiceError::Inference(format!("{:#}", e)))?;

        let raw = self
            .regressor
            .predict(scaled)
            .map_err(|e| ServiceError::Inference(format!("{:#}", e)))?;

        if !raw.is_finite() {
            return Err(ServiceError::Inference(format!(
                "model produced a non-finite value ({})",
                raw
            )));
        }
        debug!("raw model output {} for {:?}", raw, request);

        let days = round_days(f64::from(raw));
        let interpretation = self.settings.interpretation.interpret(days).to_string();

        Ok(PredictionResponse {
            predicted_growth_days: days,
            interpretation,
            model_used: self.info.model_name.clone(),
            input_conditions: Some(*request),
            model_accuracy_r2: Some(self.info.accuracy()),
        })
    }
}

/// Growth days can't be negative; two decimals is what callers see.
fn round_days(raw: f64) -> f64 {
    (raw.max(0.0) * 100.0).round() / 100.0
}

/// Whether the artifacts made it into memory at startup.
pub enum ModelState {
    Ready(Arc<Predictor>),
    Unavailable(String),
}

impl ModelState {
    /// Never fails: a broken deployment still starts and reports itself
    /// through `/health`.
    pub fn load(config: &ServiceConfig) -> Self {
        match load_artifacts(config) {
            Ok(artifacts) => {
                info!("Model loaded: {}", artifacts.info.model_name);
                info!("R² Score: {:.4}", artifacts.info.test_r2);
                info!("Features: {}", artifacts.info.features.join(", "));
                ModelState::Ready(Arc::new(Predictor::new(
                    Box::new(artifacts.scaler),
                    Box::new(artifacts.regressor),
                    artifacts.info,
                    config.settings.clone(),
                )))
            }
            Err(e) => {
                error!("Model unavailable: {}", e);
                ModelState::Unavailable(e.to_string())
            }
        }
    }

    pub fn predictor(&self) -> Result<Arc<Predictor>, ServiceError> {
        match self {
            ModelState::Ready(predictor) => Ok(predictor.clone()),
            ModelState::Unavailable(reason) => Err(ServiceError::ModelUnavailable(reason.clone())),
        }
    }
}
