use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of numeric features the model is trained on
pub const FEATURE_COUNT: usize = 13;

/// Name of the derived column appended to prediction results
pub const PREDICTED_PRICE_COLUMN: &str = "Predicted Price";

/// One input feature of the house price model
///
/// `Feature::ALL` is the schema: the model is order-sensitive, so every
/// shaped row lists its values in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Bedrooms,
    Bathrooms,
    LivingArea,
    LotArea,
    Floors,
    Views,
    AreaExcludingBasement,
    BasementArea,
    BuiltYear,
    RenovationYear,
    LivingAreaRenov,
    SchoolsNearby,
    AirportDistance,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Bedrooms,
        Feature::Bathrooms,
        Feature::LivingArea,
        Feature::LotArea,
        Feature::Floors,
        Feature::Views,
        Feature::AreaExcludingBasement,
        Feature::BasementArea,
        Feature::BuiltYear,
        Feature::RenovationYear,
        Feature::LivingAreaRenov,
        Feature::SchoolsNearby,
        Feature::AirportDistance,
    ];

    /// Column name as it must appear in an uploaded CSV header
    pub const fn column_name(self) -> &'static str {
        match self {
            Feature::Bedrooms => "number of bedrooms",
            Feature::Bathrooms => "number of bathrooms",
            Feature::LivingArea => "living area",
            Feature::LotArea => "lot area",
            Feature::Floors => "number of floors",
            Feature::Views => "number of views",
            Feature::AreaExcludingBasement => "Area of the house(excluding basement)",
            Feature::BasementArea => "Area of the basement",
            Feature::BuiltYear => "Built Year",
            Feature::RenovationYear => "Renovation Year",
            Feature::LivingAreaRenov => "living_area_renov",
            Feature::SchoolsNearby => "Number of schools nearby",
            Feature::AirportDistance => "Distance from the airport",
        }
    }

    /// Human readable label used on the manual entry form
    pub const fn label(self) -> &'static str {
        match self {
            Feature::Bedrooms => "Number of Bedrooms",
            Feature::Bathrooms => "Number of Bathrooms",
            Feature::LivingArea => "Living Area (sq ft)",
            Feature::LotArea => "Lot Area (sq ft)",
            Feature::Floors => "Number of Floors",
            Feature::Views => "Number of Views",
            Feature::AreaExcludingBasement => "Area of the house (excluding basement)",
            Feature::BasementArea => "Area of the basement (sq ft)",
            Feature::BuiltYear => "Built Year",
            Feature::RenovationYear => "Renovation Year",
            Feature::LivingAreaRenov => "Living Area Renovation (sq ft)",
            Feature::SchoolsNearby => "Number of Schools Nearby",
            Feature::AirportDistance => "Distance from the Airport (km)",
        }
    }

    /// Manual entry bounds and default value
    pub const fn bounds(self) -> FieldBounds {
        match self {
            Feature::Bedrooms => FieldBounds::at_least(0.0, 3.0),
            Feature::Bathrooms => FieldBounds::at_least(0.0, 2.0),
            Feature::LivingArea => FieldBounds::at_least(0.0, 1500.0),
            Feature::LotArea => FieldBounds::at_least(0.0, 5000.0),
            Feature::Floors => FieldBounds::at_least(1.0, 1.0),
            Feature::Views => FieldBounds::at_least(0.0, 0.0),
            Feature::AreaExcludingBasement => FieldBounds::at_least(0.0, 1500.0),
            Feature::BasementArea => FieldBounds::at_least(0.0, 0.0),
            Feature::BuiltYear => FieldBounds::between(1800.0, 2023.0, 2000.0),
            Feature::RenovationYear => FieldBounds::between(0.0, 2023.0, 0.0),
            Feature::LivingAreaRenov => FieldBounds::at_least(0.0, 1500.0),
            Feature::SchoolsNearby => FieldBounds::at_least(0.0, 1.0),
            Feature::AirportDistance => FieldBounds::at_least(0.0, 10.0),
        }
    }

    /// Position of this feature in the schema
    pub const fn index(self) -> usize {
        // variants are declared in schema order
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Column names of the schema, in order
pub fn schema_columns() -> Vec<&'static str> {
    Feature::ALL.iter().map(|f| f.column_name()).collect()
}

/// Bounds enforced on a manual entry field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: Option<f64>,
    pub default: f64,
}

impl FieldBounds {
    const fn at_least(min: f64, default: f64) -> Self {
        Self { min, max: None, default }
    }

    const fn between(min: f64, max: f64, default: f64) -> Self {
        Self { min, max: Some(max), default }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// A single cell of an uploaded table
///
/// Cells keep whatever the file contained. Shaping never coerces types;
/// the model gateway rejects anything that is not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Interpret a raw CSV field
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Empty => Ok(()),
        }
    }
}

/// Table as uploaded: arbitrary named columns in arbitrary order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Row projected onto the schema, values in `Feature::ALL` order
///
/// Holds exactly one cell per feature, so a short row cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRow([CellValue; FEATURE_COUNT]);

impl ShapedRow {
    pub(crate) fn new(cells: [CellValue; FEATURE_COUNT]) -> Self {
        Self(cells)
    }

    pub fn get(&self, feature: Feature) -> &CellValue {
        &self.0[feature.index()]
    }

    pub fn values(&self) -> &[CellValue] {
        &self.0
    }
}

/// Table whose every row matches the schema exactly
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedTable {
    rows: Vec<ShapedRow>,
}

impl ShapedTable {
    /// Only the shaper builds shaped tables
    pub(crate) fn from_rows(rows: Vec<ShapedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ShapedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Back to a raw table with schema column names
    pub fn to_raw(&self) -> RawTable {
        RawTable {
            columns: schema_columns().into_iter().map(String::from).collect(),
            rows: self.rows.iter().map(|r| r.0.to_vec()).collect(),
        }
    }

    /// Echo the shaped input with the predictions appended as a derived column
    pub fn with_predictions(&self, predictions: &[f64]) -> RawTable {
        let mut table = self.to_raw();
        table.columns.push(PREDICTED_PRICE_COLUMN.to_string());
        for (row, price) in table.rows.iter_mut().zip(predictions) {
            row.push(CellValue::Number(*price));
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_and_names() {
        let columns = schema_columns();
        assert_eq!(columns.len(), FEATURE_COUNT);
        assert_eq!(columns[0], "number of bedrooms");
        assert_eq!(columns[3], "lot area");
        assert_eq!(columns[8], "Built Year");
        assert_eq!(columns[12], "Distance from the airport");
    }

    #[test]
    fn test_feature_index_matches_position() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_defaults_within_bounds() {
        for feature in Feature::ALL {
            let bounds = feature.bounds();
            assert!(bounds.contains(bounds.default), "{} default out of range", feature);
        }
    }

    #[test]
    fn test_cell_parse() {
        assert_eq!(CellValue::parse(" 3 "), CellValue::Number(3.0));
        assert_eq!(CellValue::parse("1.5e3"), CellValue::Number(1500.0));
        assert_eq!(CellValue::parse(""), CellValue::Empty);
        assert_eq!(CellValue::parse("three"), CellValue::Text("three".to_string()));
    }

    #[test]
    fn test_with_predictions_appends_column() {
        let table = ShapedTable::from_rows(vec![ShapedRow::new(std::array::from_fn(|_| CellValue::Number(1.0)))]);
        let out = table.with_predictions(&[250000.0]);
        assert_eq!(out.columns.last().map(String::as_str), Some(PREDICTED_PRICE_COLUMN));
        assert_eq!(out.rows[0].len(), FEATURE_COUNT + 1);
        assert_eq!(out.rows[0][FEATURE_COUNT], CellValue::Number(250000.0));
    }
}
