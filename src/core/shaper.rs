use crate::models::{Feature, ManualEntryRequest, RawTable, ShapedRow, ShapedTable, CellValue, FEATURE_COUNT};
use thiserror::Error;

/// Errors raised while turning user input into model-ready rows
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("The CSV file must contain the following columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("The uploaded file is empty or has no header row")]
    EmptyInput,

    #[error("Could not read CSV: {0}")]
    Csv(String),
}

/// Schema fields absent from `available`, in schema order
///
/// Matching is exact: case and spacing must agree with the schema name.
pub fn missing_columns<S: AsRef<str>>(available: &[S]) -> Vec<&'static str> {
    Feature::ALL
        .iter()
        .map(|f| f.column_name())
        .filter(|name| !available.iter().any(|c| c.as_ref() == *name))
        .collect()
}

/// Project an uploaded table onto the schema
///
/// Fails if any schema column is missing; no partial table is produced.
/// Extra columns are dropped and row order is preserved. With duplicate
/// header names the first occurrence wins.
pub fn shape_table(table: &RawTable) -> Result<ShapedTable, ShapeError> {
    let missing = missing_columns(&table.columns);
    if !missing.is_empty() {
        return Err(ShapeError::MissingColumns(missing));
    }

    // Position of each schema column in the upload
    let positions: [Option<usize>; FEATURE_COUNT] = std::array::from_fn(|i| {
        table
            .columns
            .iter()
            .position(|c| c == Feature::ALL[i].column_name())
    });

    let rows = table
        .rows
        .iter()
        .map(|row| {
            ShapedRow::new(std::array::from_fn(|i| {
                positions[i]
                    .and_then(|idx| row.get(idx).cloned())
                    .unwrap_or(CellValue::Empty)
            }))
        })
        .collect();

    Ok(ShapedTable::from_rows(rows))
}

/// Build the single-row table for a manual entry
///
/// The form always supplies every field, so this cannot fail. Bad values
/// surface later at the model gateway.
pub fn shape_manual(entry: &ManualEntryRequest) -> ShapedTable {
    let row = ShapedRow::new(std::array::from_fn(|i| {
        CellValue::Number(entry.value_of(Feature::ALL[i]))
    }));
    ShapedTable::from_rows(vec![row])
}
