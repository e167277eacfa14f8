// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Delimited-text parsing for FAQ imports

mod csv_parser;

pub use csv_parser::{CsvParser, FaqCsvRow};
