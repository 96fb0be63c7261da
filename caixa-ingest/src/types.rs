use caixa_core::TransactionRecord;
use caixa_finance::AmountError;
use serde::Serialize;
use thiserror::Error;

/// Column layouts recognized by the row parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowLayout {
    /// date, description, signed amount
    Generic,
    /// date, description, detail, document, credit, debit, balance
    BankExport,
}

impl RowLayout {
    pub fn from_column_count(n: usize) -> Option<Self> {
        match n {
            3 => Some(RowLayout::Generic),
            7 => Some(RowLayout::BankExport),
            _ => None,
        }
    }
}

/// Why a row did not become a record
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SkipReason {
    #[error("expected 3 or 7 columns, found {0}")]
    ColumnCount(usize),

    #[error("unparseable date {0:?}")]
    BadDate(String),

    #[error("bad amount: {0}")]
    BadAmount(#[from] AmountError),

    #[error("no amount (empty or zero)")]
    NoAmount,

    #[error("both credit and debit are filled in")]
    BothAmounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: u64,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: SkipReason,
    pub raw: String,
}

fn serialize_reason<S: serde::Serializer>(reason: &SkipReason, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

/// Result of importing one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub records: Vec<TransactionRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}
