use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use moss_contract::{ErrorBody, FieldError};
use std::path::PathBuf;
use thiserror::Error;

/// Failures while serving a request. Each maps to one HTTP status.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Validation error: {0}")]
    MalformedBody(String),

    #[error("Failed to load model or make prediction. Please check model files. ({0})")]
    ModelUnavailable(String),

    #[error("Prediction error: {0}")]
    Inference(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::MalformedBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::ModelUnavailable(_) | ServiceError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::Validation(errors) => {
                ErrorBody::with_errors(self.to_string(), errors.clone())
            }
            _ => ErrorBody::new(self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Failures while loading the model, scaler and metadata at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Missing required files: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("I/O error for file '{}': {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse JSON from '{}': {1}", .0.display())]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Failed to load ONNX model '{}': {1}", .0.display())]
    Onnx(PathBuf, String),

    #[error("Invalid artifact '{}': {1}", .0.display())]
    Invalid(PathBuf, String),
}
