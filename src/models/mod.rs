// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Feature, FieldBounds, CellValue, RawTable, ShapedRow, ShapedTable, FEATURE_COUNT, PREDICTED_PRICE_COLUMN, schema_columns};
pub use requests::ManualEntryRequest;
pub use responses::{TableResponse, ManualPredictionResponse, SchemaField, SchemaResponse, HealthResponse, ErrorResponse};
