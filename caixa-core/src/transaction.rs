//! Transaction record types handed to the persistence layer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Universal fallback category, valid for every transaction type.
pub const FALLBACK_CATEGORY: &str = "Outros";

/// Kind of money movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Investment,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Investment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Investment => "investment",
        }
    }

    /// Portuguese label used in chat replies
    pub fn label_pt(&self) -> &'static str {
        match self {
            TransactionType::Income => "Receita",
            TransactionType::Expense => "Despesa",
            TransactionType::Investment => "Investimento",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" | "entrada" => Ok(TransactionType::Income),
            "expense" | "despesa" | "saida" | "saída" => Ok(TransactionType::Expense),
            "investment" | "investimento" => Ok(TransactionType::Investment),
            other => Err(RecordError::UnknownType(other.to_string())),
        }
    }
}

/// How a record was created
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Manual,
    Whatsapp,
    Csv,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Manual => "manual",
            Source::Whatsapp => "whatsapp",
            Source::Csv => "csv",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    #[error("category must not be empty")]
    EmptyCategory,

    #[error("unknown transaction type: {0}")]
    UnknownType(String),
}

/// A classified transaction, ready to be stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub category: String,
    /// Always positive; direction is carried by `kind`
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub source: Source,
    /// Heuristic certainty of the category/type guess (1.0 for manual entries)
    pub confidence: f64,
}

impl TransactionRecord {
    /// Create a record, rejecting zero/negative amounts and empty categories.
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        kind: TransactionType,
        description: impl Into<String>,
        source: Source,
    ) -> Result<Self, RecordError> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(RecordError::NonPositiveAmount(amount));
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(RecordError::EmptyCategory);
        }
        Ok(Self {
            date,
            category,
            amount,
            kind,
            description: description.into(),
            source,
            confidence: 1.0,
        })
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Effect on the balance: income adds, expense and investment subtract
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense | TransactionType::Investment => -self.amount,
        }
    }
}
