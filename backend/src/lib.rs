pub mod config;
pub mod error;
pub mod inference;
pub mod models;
pub mod predictor;
pub mod routes;

pub use config::ServiceConfig;
pub use error::{ArtifactError, ServiceError};
pub use inference::{FeatureScaler, OnnxRegressor, Regressor, StandardScaler, FEATURE_COUNT};
pub use models::ModelInfo;
pub use predictor::{ModelState, Predictor};
pub use routes::{configure, AppState};
