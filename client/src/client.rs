use log::{debug, info, warn};
use moss_contract::{PredictionRequest, PredictionResponse};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, GENERIC_VALIDATION_DETAIL};
use crate::validate::FormInput;

/// Talks to the prediction service. One attempt per call, never retried.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl PredictionClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Unknown(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validates the raw form locally, then submits it. Nothing is sent when
    /// a field is invalid.
    pub async fn submit_form(&self, form: &FormInput) -> Result<PredictionResponse, ClientError> {
        let request = form
            .parse(&self.config.settings.ranges)
            .map_err(ClientError::InvalidInput)?;
        self.submit(&request).await
    }

    pub async fn submit(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError> {
        let url = self.config.predict_url();
        debug!("POST {} {:?}", url, request);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        // Only 200 and 422 bodies matter; the rest are classified by status alone.
        let status = response.status();
        let result = match status {
            StatusCode::OK => {
                let body = response.text().await.map_err(|e| self.classify(e))?;
                serde_json::from_str::<PredictionResponse>(&body)
                    .map_err(|e| ClientError::Protocol(e.to_string()))
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response.text().await.map_err(|e| self.classify(e))?;
                Err(ClientError::ServerValidation(
                    validation_detail(&body)
                        .unwrap_or_else(|| GENERIC_VALIDATION_DETAIL.to_string()),
                ))
            }
            StatusCode::INTERNAL_SERVER_ERROR => Err(ClientError::ServerFault),
            other => Err(ClientError::UnexpectedStatus(other.as_u16())),
        };

        match &result {
            Ok(prediction) => info!(
                "Predicted {} days ({})",
                prediction.predicted_growth_days, prediction.interpretation
            ),
            Err(e) => warn!("Prediction failed with status {}: {}", status, e),
        }
        result
    }

    /// Best-effort liveness probe. Any failure counts as unhealthy.
    pub async fn health(&self) -> bool {
        let url = self.config.health_url();
        match self
            .http
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                debug!("Health probe to {} failed: {}", url, e);
                false
            }
        }
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        ClientError::from_reqwest(err, self.config.timeout)
    }
}

/// Pulls a readable message out of a 422 body. Accepts a plain string
/// `detail` and the list-of-objects form some frameworks emit.
fn validation_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
