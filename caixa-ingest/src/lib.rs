//! caixa-ingest: CSV statement import (generic spreadsheets and bank exports).

pub mod import;
pub mod parsers;
pub mod types;

pub use import::{decode_text, detect_delimiter, import_csv, import_csv_path, import_csv_str};
pub use parsers::{parse_date, parse_row};
pub use types::{ImportReport, RowLayout, SkipReason, SkippedRow};
