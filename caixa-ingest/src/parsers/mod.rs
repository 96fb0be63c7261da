//! Row parsers for the two supported CSV layouts.

pub mod bank_export;
pub mod generic;

use caixa_core::TransactionRecord;
use caixa_finance::Classifier;
use chrono::NaiveDate;

use crate::types::{RowLayout, SkipReason};

// `%y` goes first: `%Y` would happily read "25" as the year 25
const DATE_FORMATS: [&str; 5] = ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"];

/// Parse a statement date (Brazilian day-first formats, plus ISO).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // Some exports append a time ("05/03/2025 14:32")
    let s = s.split_whitespace().next().unwrap_or(s);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Turn one row into a record, choosing the layout from its column count.
pub fn parse_row(fields: &[&str], classifier: &Classifier) -> Result<TransactionRecord, SkipReason> {
    let layout = RowLayout::from_column_count(fields.len()).ok_or(SkipReason::ColumnCount(fields.len()))?;

    let date = parse_date(fields[0]).ok_or_else(|| SkipReason::BadDate(fields[0].trim().to_string()))?;

    match layout {
        RowLayout::Generic => generic::parse(date, fields, classifier),
        RowLayout::BankExport => bank_export::parse(date, fields, classifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caixa_core::{Source, TransactionType};

    #[test]
    fn test_parse_date_formats() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(parse_date("05/03/2025"), Some(d));
        assert_eq!(parse_date("05/03/25"), Some(d));
        assert_eq!(parse_date("2025-03-05"), Some(d));
        assert_eq!(parse_date("05-03-2025"), Some(d));
        assert_eq!(parse_date("05.03.2025"), Some(d));
        assert_eq!(parse_date(" 05/03/2025 14:32 "), Some(d));
        assert_eq!(parse_date("Data"), None);
        assert_eq!(parse_date("31/02/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_wrong_column_count() {
        let c = Classifier::default();
        assert_eq!(parse_row(&["05/03/2025", "x"], &c), Err(SkipReason::ColumnCount(2)));
        assert_eq!(
            parse_row(&["05/03/2025", "a", "b", "c", "d"], &c),
            Err(SkipReason::ColumnCount(5))
        );
    }

    #[test]
    fn test_header_row_is_bad_date() {
        let c = Classifier::default();
        let r = parse_row(&["Data", "Descrição", "Valor"], &c);
        assert_eq!(r, Err(SkipReason::BadDate("Data".to_string())));
    }

    #[test]
    fn test_dispatches_on_layout() {
        let c = Classifier::default();
        let generic = parse_row(&["05/03/2025", "Padaria", "-12,50"], &c).unwrap();
        assert_eq!(generic.kind, TransactionType::Expense);
        assert_eq!(generic.source, Source::Csv);

        let bank = parse_row(&["05/03/2025", "PIX", "", "", "150,00", "0", "1.000,00"], &c).unwrap();
        assert_eq!(bank.kind, TransactionType::Income);
    }
}
