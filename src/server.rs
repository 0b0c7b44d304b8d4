//! HTTP server assembly: routes, body limits, CORS and startup.

use crate::controllers::{studio_controller, ApiError};
use crate::models::Config;
use crate::studio::Studio;
use crate::Result;
use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{info, warn};

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(studio_controller::config);
}

/// JSON extractor settings; rejected bodies render as `{"detail": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Multipart settings for image uploads of at most `max_upload_bytes`.
pub fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .memory_limit(max_upload_bytes)
        .total_limit(max_upload_bytes + 64 * 1024)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.iter().any(|origin| origin == "*") {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

pub async fn run(config: Config) -> Result<()> {
    if config.gemini_api_key.is_none() {
        warn!("No Gemini credential configured; model requests will be rejected until one is set");
    }

    // One connection pool for every request.
    let http_client = reqwest::Client::new();
    let studio = web::Data::new(Studio::from_config(&config, http_client));

    let origins = config.cors_allowed_origins.clone();
    let max_upload_bytes = config.max_upload_bytes;
    let address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(studio.clone())
            .app_data(multipart_config(max_upload_bytes))
            .wrap(build_cors(&origins))
            .wrap(Logger::default())
            .configure(app_config)
    })
    .bind(&address)?
    .run();

    info!("Starting AI Creative Studio backend on http://{}", address);

    server.await?;
    Ok(())
}
