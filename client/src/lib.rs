//! Client side of the moss growth prediction service: checks form input
//! locally, then sends a single request and turns every outcome into one
//! user-facing message.

pub mod client;
pub mod config;
pub mod error;
pub mod validate;

pub use client::PredictionClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientValidationError};
pub use validate::{validate, FormInput};
