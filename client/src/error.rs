use moss_contract::{Field, FieldRange};
use std::time::Duration;
use thiserror::Error;

/// Problem with a single form field, caught before anything is sent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientValidationError {
    #[error("{} is required", .0.label())]
    Empty(Field),

    #[error("{} must be a number", .0.label())]
    NotNumeric(Field),

    #[error("{}", .range.describe())]
    OutOfRange { range: FieldRange, value: f64 },
}

impl ClientValidationError {
    pub fn field(&self) -> Field {
        match self {
            ClientValidationError::Empty(field) | ClientValidationError::NotNumeric(field) => {
                *field
            }
            ClientValidationError::OutOfRange { range, .. } => range.field,
        }
    }
}

/// Every way a prediction attempt can end other than success. The `Display`
/// text is the message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Please fix the form: {}", join_messages(.0))]
    InvalidInput(Vec<ClientValidationError>),

    #[error("Invalid input: {0}")]
    ServerValidation(String),

    #[error("Server error. Please try again later.")]
    ServerFault,

    #[error("Unexpected response from server (status {0}).")]
    UnexpectedStatus(u16),

    #[error("Network error: could not reach the prediction server ({0}).")]
    Transport(String),

    #[error("Could not read the server response: {0}")]
    Protocol(String),

    #[error("Request timed out after {0:?}. The server may be starting up, please try again.")]
    Timeout(Duration),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

pub(crate) const GENERIC_VALIDATION_DETAIL: &str = "Invalid input values. Please check your entries.";

fn join_messages(errors: &[ClientValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ClientError {
    /// The single line to put in the result slot.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout)
        } else if err.is_connect() {
            ClientError::Transport(err.to_string())
        } else if err.is_decode() {
            ClientError::Protocol(err.to_string())
        } else {
            ClientError::Unknown(err.to_string())
        }
    }
}
