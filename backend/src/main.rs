mod error;
mod pipeline;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use pipeline::Pipeline;
use pipeline::config::PipelineConfig;
use routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let static_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../static", manifest_dir)
    } else {
        "/usr/src/app/static".to_string()
    };

    let config = match PipelineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load pipeline config: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Config loading failed: {}", e),
            ));
        }
    };
    log::info!(
        "Inference contract: {0}x{0} input, {1} pixel scaling, {2:.0}% confidence threshold",
        config.image.size,
        config.scaling.as_str(),
        config.confidence_threshold
    );

    // The model is loaded exactly once here and injected read-only into the
    // handlers; a missing or unloadable artifact means the service has no
    // function, so startup aborts.
    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            log::error!("Failed to load model at startup: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Model loading failed: {}", e),
            ));
        }
    };
    let pipeline = web::Data::new(pipeline);

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(pipeline.clone())
            .configure(|cfg| configure_routes(cfg, static_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
