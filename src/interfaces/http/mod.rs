// ============================================================
// HTTP FACADE
// ============================================================
// Multipart upload, analysis pipeline invocation, plot serving

use crate::application::AnalyzeCsvUseCase;
use crate::domain::llm_config::LLMConfig;
use crate::domain::report::PlotOutcome;
use crate::infrastructure::storage;
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::dev::Server;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use futures_util::TryStreamExt;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

pub struct HttpState {
    pub analyze_use_case: AnalyzeCsvUseCase,
    pub llm_config: LLMConfig,
    pub upload_root: PathBuf,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub summary: String,
    /// `/plot/<upload-id>` when a histogram was rendered, empty otherwise
    pub image: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Backend is alive and kicking!")
}

#[post("/upload")]
async fn upload(data: web::Data<HttpState>, mut payload: Multipart) -> impl Responder {
    // Pull the bytes of the `file` field out of the multipart stream
    let mut file_bytes: Option<Vec<u8>> = None;
    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::new(format!("Invalid multipart body: {}", e)));
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let mut bytes = Vec::new();
        loop {
            match field.try_next().await {
                Ok(Some(chunk)) => bytes.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    return HttpResponse::BadRequest()
                        .json(ErrorResponse::new(format!("Failed to read upload: {}", e)));
                }
            }
        }
        file_bytes = Some(bytes);
        break;
    }

    let Some(file_bytes) = file_bytes else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("No file uploaded"));
    };

    let (upload_id, _dir) = match storage::allocate_upload_dir(&data.upload_root) {
        Ok(allocated) => allocated,
        Err(e) => {
            error!(error = %e, "Failed to allocate upload dir");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Failed to store upload: {}", e)));
        }
    };

    let csv_path = storage::csv_path(&data.upload_root, &upload_id);
    if let Err(e) = std::fs::write(&csv_path, &file_bytes) {
        error!(error = %e, upload_id = %upload_id, "Failed to write uploaded file");
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::new(format!("Failed to store upload: {}", e)));
    }

    info!(upload_id = %upload_id, size = file_bytes.len(), "CSV stored, starting analysis");

    let plot_path = storage::plot_path(&data.upload_root, &upload_id);
    match data
        .analyze_use_case
        .execute(&data.llm_config, &upload_id, &csv_path, &plot_path)
        .await
    {
        Ok(report) => {
            let image = match report.plot {
                PlotOutcome::Rendered { .. } => format!("/plot/{}", upload_id),
                PlotOutcome::Skipped { .. } => String::new(),
            };
            HttpResponse::Ok().json(UploadResponse {
                summary: report.narration,
                image,
            })
        }
        Err(e) => {
            error!(error = %e, upload_id = %upload_id, "Analysis failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

#[get("/plot/{upload_id}")]
async fn plot(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let upload_id = path.into_inner();
    if !storage::is_valid_upload_id(&upload_id) {
        return HttpResponse::NotFound().json(ErrorResponse::new("Plot not found"));
    }

    let plot_file = storage::plot_path(&data.upload_root, &upload_id);
    match std::fs::read(&plot_file) {
        Ok(bytes) => HttpResponse::Ok().content_type("image/png").body(bytes),
        Err(_) => HttpResponse::NotFound().json(ErrorResponse::new("Plot not found")),
    }
}

/// Route registration, shared by the server and the endpoint tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(upload).service(plot);
}

/// Build the HTTP server. CORS is permissive: the upload frontend is
/// served from a different origin during development.
pub fn build_server(state: Arc<HttpState>, host: &str, port: u16) -> std::io::Result<Server> {
    let data = web::Data::from(state);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();
    Ok(server)
}
