use actix_web::error::JsonPayloadError;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use log::{info, warn};
use moss_contract::{ErrorBody, HealthStatus, PredictionRequest, PredictionSettings};

use crate::error::ServiceError;
use crate::models::ServiceInfo;
use crate::predictor::ModelState;

const JSON_LIMIT: usize = 64 * 1024;

/// Shared by every worker; built once at startup.
pub struct AppState {
    pub model: ModelState,
    pub settings: PredictionSettings,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(model: ModelState, settings: PredictionSettings) -> Self {
        Self {
            model,
            settings,
            started_at: chrono::Utc::now(),
        }
    }
}

/// Registers every route plus the JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(json_error_handler),
    )
    .service(root)
    .service(health)
    .service(predict)
    .default_service(web::route().to(not_found));
}

/// Missing, mistyped or unparsable fields are the caller's fault, so they
/// answer 422 like range violations do.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    ServiceError::MalformedBody(err.to_string()).into()
}

#[get("/")]
async fn root(state: web::Data<AppState>) -> impl Responder {
    let model = match &state.model {
        ModelState::Ready(predictor) => Some(predictor.info().model_name.clone()),
        ModelState::Unavailable(_) => None,
    };
    HttpResponse::Ok().json(ServiceInfo::new(model, state.started_at))
}

#[get("/health")]
async fn health(state: web::Data<AppState>) -> impl Responder {
    match &state.model {
        ModelState::Ready(predictor) => {
            let info = predictor.info();
            HttpResponse::Ok().json(HealthStatus::healthy(&info.model_name, info.accuracy()))
        }
        ModelState::Unavailable(reason) => {
            HttpResponse::ServiceUnavailable().json(HealthStatus::unhealthy(reason))
        }
    }
}

#[post("/predict")]
async fn predict(
    state: web::Data<AppState>,
    input: web::Json<PredictionRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = input.into_inner();
    // Bad input is the caller's problem even while the model is down.
    if let Err(errors) = request.validate(&state.settings.ranges) {
        let err = ServiceError::Validation(errors);
        warn!("{}", err);
        return Err(err);
    }
    let predictor = state.model.predictor()?;

    let result = web::block(move || predictor.predict(&request))
        .await
        .map_err(|e| ServiceError::Inference(e.to_string()))?;

    match result {
        Ok(response) => {
            info!(
                "Prediction: {:.2} days ({})",
                response.predicted_growth_days, response.interpretation
            );
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            warn!("{}", e);
            Err(e)
        }
    }
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Endpoint not found"))
}
