use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use futures_util::TryStreamExt;
use serde::Serialize;
use tracing::{error, info};

use crate::application::use_cases::upload_summary::UploadSummaryUseCase;
use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;

pub struct AppState {
    pub summary_use_case: UploadSummaryUseCase,
    pub max_upload_bytes: usize,
}

/// One uploaded file, fully buffered. Lives for the duration of a request.
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Map a pipeline error onto its HTTP status with a `detail` body.
fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        detail: err.detail().to_string(),
    };
    match err {
        AppError::InvalidInput(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Drain the multipart payload into memory and pick out the file field.
///
/// The first field carrying a filename wins; remaining fields are ignored.
/// Reading stops as soon as the configured size cap is exceeded.
async fn read_upload(
    mut payload: Multipart,
    max_upload_bytes: usize,
) -> Result<UploadedFile, AppError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart payload: {}", e)))?
    {
        let filename = field
            .content_disposition()
            .get_filename()
            .map(|name| name.to_string());

        let Some(filename) = filename else {
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Malformed multipart payload: {}", e)))?
        {
            if bytes.len() + chunk.len() > max_upload_bytes {
                return Err(AppError::InvalidInput(format!(
                    "File exceeds maximum upload size of {} bytes",
                    max_upload_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile { filename, bytes });
    }

    Err(AppError::InvalidInput(
        "No file field in upload".to_string(),
    ))
}

#[post("/upload")]
async fn upload_file(data: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let upload = match read_upload(payload, data.max_upload_bytes).await {
        Ok(upload) => upload,
        Err(e) => {
            error!(error = %e, "Rejected upload payload");
            return error_response(&e);
        }
    };

    info!(
        filename = %upload.filename,
        size = upload.bytes.len(),
        "Processing upload"
    );

    match data
        .summary_use_case
        .execute(&upload.filename, &upload.bytes)
    {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => {
            error!(filename = %upload.filename, error = %e, "Upload processing failed");
            error_response(&e)
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn start_server(config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(AppState {
        summary_use_case: UploadSummaryUseCase::new(config.preview_rows),
        max_upload_bytes: config.max_upload_bytes,
    });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(upload_file)
            .service(health)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
