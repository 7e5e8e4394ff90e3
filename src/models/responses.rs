use serde::{Deserialize, Serialize};
use crate::models::domain::{CellValue, FieldBounds, RawTable};

/// Response for the CSV prediction and upload preview endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub row_count: usize,
}

impl From<RawTable> for TableResponse {
    fn from(table: RawTable) -> Self {
        Self {
            row_count: table.rows.len(),
            columns: table.columns,
            rows: table.rows,
        }
    }
}

/// Response for the manual prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPredictionResponse {
    pub predicted_price: f64,
    pub formatted: String,
}

/// One field of the schema as described to the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub bounds: FieldBounds,
}

/// Schema endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub fields: Vec<SchemaField>,
    pub prediction_column: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
