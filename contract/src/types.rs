use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, ValidationRanges};

/// Environmental readings submitted for a single prediction.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub tds: f64,
    pub ph: f64,
}

impl PredictionRequest {
    pub fn new(temperature: f64, humidity: f64, tds: f64, ph: f64) -> Self {
        Self {
            temperature,
            humidity,
            tds,
            ph,
        }
    }

    pub fn validate(&self, ranges: &ValidationRanges) -> Result<(), Vec<FieldError>> {
        ranges.validate(self)
    }

    /// Feature vector in the column order the model was trained on.
    pub fn to_features(&self) -> [f32; 4] {
        [
            self.temperature as f32,
            self.humidity as f32,
            self.tds as f32,
            self.ph as f32,
        ]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PredictionResponse {
    /// Accepts both `18` and `18.45` on the wire.
    pub predicted_growth_days: f64,
    pub interpretation: String,
    pub model_used: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_conditions: Option<PredictionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_accuracy_r2: Option<f64>,
}

/// Body of every non-200 answer from the service.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(detail: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            detail: detail.into(),
            errors,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_accuracy: Option<f64>,
    pub message: String,
}

impl HealthStatus {
    pub fn healthy(model_name: &str, model_accuracy: f64) -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded: true,
            model_name: Some(model_name.to_string()),
            model_accuracy: Some(model_accuracy),
            message: "API is operational and model is loaded successfully".to_string(),
        }
    }

    pub fn unhealthy(reason: &str) -> Self {
        Self {
            status: "unhealthy".to_string(),
            model_loaded: false,
            model_name: None,
            model_accuracy: None,
            message: reason.to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.model_loaded && self.status == "healthy"
    }
}
