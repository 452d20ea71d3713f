//! Shared contract between the moss growth prediction service and its clients.
//!
//! Both sides validate against the same [`ValidationRanges`] and speak the same
//! JSON types, so the rules live here once.

pub mod interpretation;
pub mod settings;
pub mod types;
pub mod validation;

pub use interpretation::{Band, InterpretationTable, TableError};
pub use settings::PredictionSettings;
pub use types::{ErrorBody, HealthStatus, PredictionRequest, PredictionResponse};
pub use validation::{Field, FieldError, FieldRange, ValidationRanges};
