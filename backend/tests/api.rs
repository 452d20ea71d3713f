use actix_web::{http::StatusCode, test, web, App};
use moss_backend::{
    configure, AppState, FeatureScaler, ModelInfo, ModelState, Predictor, Regressor,
    FEATURE_COUNT,
};
use moss_contract::{
    ErrorBody, HealthStatus, PredictionRequest, PredictionResponse, PredictionSettings,
};
use serde_json::json;
use std::sync::Arc;

/// Centers temperature on 20 so the fake model below reacts to it.
struct ShiftTemperature;

impl FeatureScaler for ShiftTemperature {
    fn transform(&self, mut features: [f32; FEATURE_COUNT]) -> anyhow::Result<[f32; FEATURE_COUNT]> {
        features[0] -= 20.0;
        Ok(features)
    }
}

/// 15 days at 20°C, two more per extra degree.
struct LinearInTemperature;

impl Regressor for LinearInTemperature {
    fn predict(&self, features: [f32; FEATURE_COUNT]) -> anyhow::Result<f32> {
        Ok(15.0 + 2.0 * features[0])
    }
}

fn ready_state() -> web::Data<AppState> {
    let predictor = Predictor::new(
        Box::new(ShiftTemperature),
        Box::new(LinearInTemperature),
        ModelInfo {
            model_name: "Random Forest".to_string(),
            test_r2: 0.624,
            features: vec![
                "Temperature".into(),
                "Humidity".into(),
                "TDS".into(),
                "pH".into(),
            ],
        },
        PredictionSettings::default(),
    );
    web::Data::new(AppState::new(
        ModelState::Ready(Arc::new(predictor)),
        PredictionSettings::default(),
    ))
}

macro_rules! app {
    () => {
        test::init_service(App::new().app_data(ready_state()).configure(configure)).await
    };
}

#[actix_web::test]
async fn sample_request_is_predicted() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"temperature": 22.5, "humidity": 70.0, "tds": 600.0, "ph": 6.4}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: PredictionResponse = test::read_body_json(resp).await;
    assert_eq!(body.predicted_growth_days, 20.0);
    assert!(body.predicted_growth_days >= 0.0);
    assert!(PredictionSettings::default()
        .interpretation
        .contains_label(&body.interpretation));
    assert_eq!(body.interpretation, "Fast growth - Good conditions");
    assert_eq!(body.model_used, "Random Forest");
    assert_eq!(body.model_accuracy_r2, Some(0.624));
}

#[actix_web::test]
async fn integer_encoded_inputs_are_accepted() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"temperature": 25, "humidity": 60, "tds": 500, "ph": 7}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: PredictionResponse = test::read_body_json(resp).await;
    assert_eq!(body.predicted_growth_days, 25.0);
    assert_eq!(body.interpretation, "Moderate growth - Acceptable conditions");
    assert_eq!(
        body.input_conditions,
        Some(PredictionRequest::new(25.0, 60.0, 500.0, 7.0))
    );
}

#[actix_web::test]
async fn out_of_range_temperature_is_rejected_not_clamped() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"temperature": 40.0, "humidity": 70.0, "tds": 600.0, "ph": 6.4}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.detail.starts_with("Validation error:"));
    assert!(body.detail.contains("temperature"));
    assert_eq!(body.errors.len(), 1);
    assert_eq!(body.errors[0].field, "temperature");
}

#[actix_web::test]
async fn every_bad_field_is_listed() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"temperature": 22.5, "humidity": 49.9, "tds": 801.0, "ph": 6.4}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: ErrorBody = test::read_body_json(resp).await;
    let fields: Vec<&str> = body.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["humidity", "tds"]);
}

#[actix_web::test]
async fn range_edges_are_accepted() {
    let app = app!();
    for (temperature, humidity, tds, ph) in [(18.0, 50.0, 400.0, 6.0), (35.0, 80.0, 800.0, 7.0)] {
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(PredictionRequest::new(temperature, humidity, tds, ph))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "edge {:?}", (temperature, humidity, tds, ph));
    }
}

#[actix_web::test]
async fn missing_or_mistyped_fields_are_unprocessable() {
    let app = app!();
    let bodies = [
        json!({"temperature": 22.5, "humidity": 70.0, "tds": 600.0}),
        json!({"temperature": "warm", "humidity": 70.0, "tds": 600.0, "ph": 6.4}),
        json!({"temperature": null, "humidity": 70.0, "tds": 600.0, "ph": 6.4}),
    ];
    for body in bodies {
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "body {}", body);

        let error: ErrorBody = test::read_body_json(resp).await;
        assert!(error.detail.starts_with("Validation error:"));
    }
}

#[actix_web::test]
async fn malformed_json_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"temperature\": 22.5,")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn health_reports_loaded_model() {
    let app = app!();
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: HealthStatus = test::read_body_json(resp).await;
    assert!(body.is_healthy());
    assert_eq!(body.model_name.as_deref(), Some("Random Forest"));
    assert_eq!(body.model_accuracy, Some(0.624));
}

#[actix_web::test]
async fn root_lists_endpoints() {
    let app = app!();
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["model"], "Random Forest");
    let paths: Vec<&str> = body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["path"].as_str())
        .collect();
    assert_eq!(paths, vec!["/predict", "/health"]);
}
