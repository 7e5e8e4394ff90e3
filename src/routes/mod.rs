// Route exports
pub mod predict;
pub mod ui;

pub use predict::{AppState, ModelStatus};

use actix_web::{
    dev::ServiceResponse,
    error,
    http::StatusCode,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    web, HttpResponse,
};
use crate::models::ErrorResponse;

/// JSON error response for rejected request payloads
#[derive(Debug)]
pub struct JsonError(pub ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let (error, status_code) = match err {
        error::JsonPayloadError::Overflow { .. } | error::JsonPayloadError::OverflowKnownLength { .. } => {
            ("payload_too_large", 413)
        }
        _ => ("invalid_json", 400),
    };
    JsonError(ErrorResponse {
        error: error.to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code,
    })
    .into()
}

/// Replace actix's plain-text 413 (oversized CSV body) with an `ErrorResponse`
fn handle_payload_too_large<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    // JSON bodies already carry an ErrorResponse from the JSON handler
    let is_json = res
        .response()
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .map_or(false, |v| v.as_bytes().starts_with(b"application/json"));
    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let (req, _) = res.into_parts();
    tracing::info!("Upload too large on {}", req.path());
    let resp = HttpResponse::PayloadTooLarge().json(ErrorResponse {
        error: "payload_too_large".to_string(),
        message: "The uploaded file exceeds the maximum upload size".to_string(),
        status_code: 413,
    });
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, resp).map_into_right_body(),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(ui::configure).service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(ErrorHandlers::new().handler(StatusCode::PAYLOAD_TOO_LARGE, handle_payload_too_large))
            .configure(predict::configure),
    );
}
