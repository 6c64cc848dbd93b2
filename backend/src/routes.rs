use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use futures::{StreamExt, TryStreamExt};
use log::{error, info};
use serde::Serialize;
use serde_json::json;
use shared::CaptureRequest;
use std::io::Write;
use uuid::Uuid;

use crate::error::PipelineError;
use crate::pipeline::Pipeline;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: String) {
    cfg.service(web::resource("/api/diagnose").route(web::post().to(handle_diagnose)))
        .service(web::resource("/api/diagnose/capture").route(web::post().to(handle_capture)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(Files::new("/", static_dir).index_file("index.html"));
}

/// File-upload boundary: the first non-empty multipart field is the image.
/// One image in, one diagnosis out; extra fields are ignored.
async fn handle_diagnose(
    pipeline: web::Data<Pipeline>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut image_data = Vec::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let mut buffer = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            buffer.write_all(&data)?;
        }
        if !buffer.is_empty() {
            image_data = buffer;
            break;
        }
    }

    if image_data.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "no image supplied".into(),
        }));
    }

    Ok(run_diagnosis(&pipeline, &image_data))
}

/// Camera-capture boundary: a JSON body carrying a base64 data URL. Funnels
/// into the same byte representation as the upload path.
async fn handle_capture(
    pipeline: web::Data<Pipeline>,
    body: web::Json<CaptureRequest>,
) -> HttpResponse {
    let encoded = match body.image_data.split_once(',') {
        Some((_, rest)) => rest,
        None => body.image_data.as_str(),
    };

    match BASE64.decode(encoded.trim()) {
        Ok(image_data) => run_diagnosis(&pipeline, &image_data),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: format!("invalid base64 image: {}", e),
        }),
    }
}

fn run_diagnosis(pipeline: &Pipeline, image_data: &[u8]) -> HttpResponse {
    let request_id = Uuid::new_v4();

    match pipeline.diagnose(image_data) {
        Ok(diagnosis) => {
            info!(
                "request {}: {} ({:.2}%, verdict {})",
                request_id, diagnosis.label, diagnosis.confidence, diagnosis.verdict
            );
            HttpResponse::Ok().json(json!({
                "request_id": request_id,
                "diagnosis": diagnosis,
            }))
        }
        Err(e @ PipelineError::InvalidImage(_)) => {
            info!("request {}: rejected input: {}", request_id, e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: e.to_string(),
            })
        }
        Err(e) => {
            error!("request {}: inference failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
