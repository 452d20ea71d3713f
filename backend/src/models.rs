use serde::{Deserialize, Serialize};

/// Metadata written next to the model when it was trained.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ModelInfo {
    pub model_name: String,
    pub test_r2: f64,
    pub features: Vec<String>,
}

impl ModelInfo {
    /// R² rounded to four decimals, as reported to callers.
    pub fn accuracy(&self) -> f64 {
        (self.test_r2 * 10_000.0).round() / 10_000.0
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Welcome document served on `/`.
#[derive(Debug, Serialize, Clone)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub description: String,
    pub model: Option<String>,
    pub started_at: String,
    pub endpoints: Vec<EndpointInfo>,
    pub usage: String,
}

impl ServiceInfo {
    pub fn new(model: Option<String>, started_at: chrono::DateTime<chrono::Utc>) -> Self {
        ServiceInfo {
            message: "Welcome to the Moss Growth Prediction API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Predict moss growth days based on environmental conditions".to_string(),
            model,
            started_at: started_at.to_rfc3339(),
            endpoints: vec![
                EndpointInfo {
                    method: "POST",
                    path: "/predict",
                    description: "Make growth predictions",
                },
                EndpointInfo {
                    method: "GET",
                    path: "/health",
                    description: "Check API and model status",
                },
            ],
            usage: "Send POST request to /predict with temperature, humidity, tds, and ph values"
                .to_string(),
        }
    }
}
