use crate::core::shaper::ShapeError;
use crate::models::{CellValue, RawTable};

/// Decode an uploaded CSV file into a raw table
///
/// The first record is the header. Header names are kept verbatim (no
/// trimming) since schema matching is exact. Cells are trimmed and parsed
/// as numbers where possible; anything else is kept as text for the model
/// gateway to reject.
pub fn parse_csv(bytes: &[u8]) -> Result<RawTable, ShapeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| ShapeError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(ShapeError::EmptyInput);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ShapeError::Csv(e.to_string()))?;
        rows.push(record.iter().map(CellValue::parse).collect());
    }

    tracing::debug!("Parsed CSV upload: {} columns, {} rows", columns.len(), rows.len());

    Ok(RawTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = parse_csv(b"a,b\n1,x\n2.5,\n").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], vec![CellValue::Number(1.0), CellValue::Text("x".to_string())]);
        assert_eq!(table.rows[1], vec![CellValue::Number(2.5), CellValue::Empty]);
    }

    #[test]
    fn test_quoted_header_with_comma() {
        let table = parse_csv(b"\"Area, total\",lot area\n1,2\n").unwrap();
        assert_eq!(table.columns, vec!["Area, total", "lot area"]);
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let table = parse_csv("\u{feff}number of bedrooms,x\n3,4\n".as_bytes()).unwrap();
        assert_eq!(table.columns[0], "number of bedrooms");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_csv(b"").unwrap_err(), ShapeError::EmptyInput);
    }

    #[test]
    fn test_ragged_record_rejected() {
        let err = parse_csv(b"a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ShapeError::Csv(_)));
    }

    #[test]
    fn test_header_only() {
        let table = parse_csv(b"a,b\n").unwrap();
        assert_eq!(table.row_count(), 0);
    }
}
