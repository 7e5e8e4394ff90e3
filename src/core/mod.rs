// Input shaping exports
pub mod csv_input;
pub mod format;
pub mod shaper;

pub use csv_input::parse_csv;
pub use format::format_price;
pub use shaper::{missing_columns, shape_manual, shape_table, ShapeError};
