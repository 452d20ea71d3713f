use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use log::{info, warn};
use moss_backend::{configure, AppState, ModelState, ServiceConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("Starting Moss Growth Prediction API v{}", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::from_env()?;
    info!("Loading artifacts from {}", config.model_dir.display());

    let model = ModelState::load(&config);
    if let ModelState::Unavailable(_) = model {
        warn!("Serving without a model; /health will report unhealthy");
    }
    let state = web::Data::new(AppState::new(model, config.settings.clone()));

    let bind_address = config.bind_address();
    info!("Listening on http://{}", bind_address);
    info!("Workers: {}", config.workers);
    info!("Endpoints:");
    info!("   GET  /          - Service information");
    info!("   GET  /health    - Model and API status");
    info!("   POST /predict   - Growth-days prediction");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .workers(config.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("Server terminated with an error")?;

    info!("Shutting down Moss Growth Prediction API");
    Ok(())
}
