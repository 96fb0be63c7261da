//! Generic 3-column spreadsheet: `date, description, amount`.
//!
//! The amount is signed (negative = money out) and the classifier infers the
//! type from the description first and the sign/magnitude last.

use caixa_core::{Source, TransactionRecord};
use caixa_finance::{Classifier, parse_csv_amount};
use chrono::NaiveDate;
use tracing::trace;

use crate::types::SkipReason;

pub(crate) fn parse(date: NaiveDate, fields: &[&str], classifier: &Classifier) -> Result<TransactionRecord, SkipReason> {
    let description = fields[1].trim();
    let amount = parse_csv_amount(fields[2])?;
    if amount == 0.0 {
        return Err(SkipReason::NoAmount);
    }

    let result = classifier.classify_csv(description, amount);
    trace!(description, amount, kind = %result.kind, category = %result.category, "generic row");

    result
        .into_record(date, description, Source::Csv)
        .map_err(|_| SkipReason::NoAmount)
}
