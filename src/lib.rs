//! House Price Form - browser form over a pre-trained house price model
//!
//! Uploaded CSV tables and manual form entries are shaped onto the fixed
//! 13-column schema the model was trained on, then handed to the model
//! gateway for a price prediction.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{shape_table, shape_manual, missing_columns, parse_csv, format_price, ShapeError};
pub use models::{Feature, RawTable, ShapedTable, CellValue, ManualEntryRequest};
pub use services::{ModelGateway, ModelError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let table = parse_csv(b"lot area\n5000\n").unwrap();
        let missing = missing_columns(&table.columns);
        assert_eq!(missing.len(), 12);
        assert!(!missing.contains(&"lot area"));
    }
}
