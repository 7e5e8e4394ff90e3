use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::UiSettings;
use crate::core::{format_price, parse_csv, shape_manual, shape_table, ShapeError};
use crate::models::{
    ErrorResponse, Feature, HealthResponse, ManualEntryRequest, ManualPredictionResponse,
    SchemaField, SchemaResponse, TableResponse, PREDICTED_PRICE_COLUMN,
};
use crate::services::{ModelError, ModelGateway};
use std::sync::Arc;

/// Outcome of loading the model at startup
#[derive(Clone)]
pub enum ModelStatus {
    Ready(Arc<ModelGateway>),
    /// Load failed; the message is shown instead of the prediction controls
    Unavailable(String),
}

impl ModelStatus {
    pub fn from_load(result: Result<ModelGateway, ModelError>) -> Self {
        match result {
            Ok(gateway) => ModelStatus::Ready(Arc::new(gateway)),
            Err(e) => ModelStatus::Unavailable(e.to_string()),
        }
    }

    pub fn gateway(&self) -> Option<&Arc<ModelGateway>> {
        match self {
            ModelStatus::Ready(gateway) => Some(gateway),
            ModelStatus::Unavailable(_) => None,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub model: ModelStatus,
    pub ui: UiSettings,
}

/// Configure all prediction-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schema", web::get().to(get_schema))
        .route("/upload/preview", web::post().to(preview_upload))
        .route("/predict/csv", web::post().to(predict_csv))
        .route("/predict/manual", web::post().to(predict_manual));
}

fn error(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Model gateway, or the 503 every interaction gets when loading failed
fn require_model(state: &AppState) -> Result<Arc<ModelGateway>, HttpResponse> {
    match &state.model {
        ModelStatus::Ready(gateway) => Ok(gateway.clone()),
        ModelStatus::Unavailable(reason) => Err(error(
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
            "model_unavailable",
            format!("Model could not be loaded: {}", reason),
        )),
    }
}

fn shape_error_response(err: &ShapeError) -> HttpResponse {
    use actix_web::http::StatusCode;
    match err {
        ShapeError::MissingColumns(_) => error(StatusCode::UNPROCESSABLE_ENTITY, "missing_columns", err.to_string()),
        ShapeError::EmptyInput => error(StatusCode::BAD_REQUEST, "empty_input", err.to_string()),
        ShapeError::Csv(_) => error(StatusCode::BAD_REQUEST, "invalid_csv", err.to_string()),
    }
}

fn prediction_error_response(context: &str, err: &ModelError) -> HttpResponse {
    error(
        actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
        "prediction_failed",
        format!("An error occurred during {}: {}", context, err),
    )
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, model) = match &state.model {
        ModelStatus::Ready(gateway) => ("healthy", Some(gateway.model_name())),
        ModelStatus::Unavailable(_) => ("model_unavailable", None),
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model,
        timestamp: chrono::Utc::now(),
    })
}

/// Describe the schema and the manual entry bounds
///
/// GET /api/v1/schema
async fn get_schema() -> impl Responder {
    let fields = Feature::ALL
        .iter()
        .map(|f| SchemaField {
            name: f.column_name().to_string(),
            label: f.label().to_string(),
            bounds: f.bounds(),
        })
        .collect();

    HttpResponse::Ok().json(SchemaResponse {
        fields,
        prediction_column: PREDICTED_PRICE_COLUMN.to_string(),
    })
}

/// Echo an uploaded CSV back as a table
///
/// POST /api/v1/upload/preview
///
/// Body is the raw CSV file.
async fn preview_upload(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    if let Err(resp) = require_model(&state) {
        return resp;
    }

    match parse_csv(&body) {
        Ok(table) => HttpResponse::Ok().json(TableResponse::from(table)),
        Err(e) => {
            tracing::info!("Rejected CSV upload preview: {}", e);
            shape_error_response(&e)
        }
    }
}

/// Predict prices for every row of an uploaded CSV
///
/// POST /api/v1/predict/csv
///
/// Body is the raw CSV file. The response echoes the schema columns in
/// model order with a `Predicted Price` column appended.
async fn predict_csv(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let gateway = match require_model(&state) {
        Ok(gateway) => gateway,
        Err(resp) => return resp,
    };

    let shaped = match parse_csv(&body).and_then(|raw| shape_table(&raw)) {
        Ok(shaped) => shaped,
        Err(e) => {
            tracing::info!("CSV shaping failed: {}", e);
            return shape_error_response(&e);
        }
    };

    match gateway.predict(&shaped) {
        Ok(predictions) => {
            tracing::info!("Predicted {} rows from CSV upload", predictions.len());
            HttpResponse::Ok().json(TableResponse::from(shaped.with_predictions(&predictions)))
        }
        Err(e) => {
            tracing::warn!(error = %e, rows = shaped.len(), "CSV prediction failed");
            prediction_error_response("prediction", &e)
        }
    }
}

/// Predict a price from the manual entry form
///
/// POST /api/v1/predict/manual
///
/// Request body: the 13 schema fields by column name. Missing fields take
/// the form defaults.
async fn predict_manual(
    state: web::Data<AppState>,
    req: web::Json<ManualEntryRequest>,
) -> impl Responder {
    let gateway = match require_model(&state) {
        Ok(gateway) => gateway,
        Err(resp) => return resp,
    };

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for manual entry: field_errors={:?}", errors);
        return error(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let shaped = shape_manual(&req);

    match gateway.predict(&shaped) {
        Ok(predictions) => {
            let price = predictions[0];
            tracing::debug!(price, "Manual prediction");
            HttpResponse::Ok().json(ManualPredictionResponse {
                predicted_price: price,
                formatted: format!(
                    "Predicted House Price: {}",
                    format_price(price, &state.ui.currency_symbol)
                ),
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "Manual prediction failed");
            prediction_error_response("manual prediction", &e)
        }
    }
}
