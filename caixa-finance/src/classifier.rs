//! Transaction classifier: free text (+ optional signed amount) to a
//! `{type, category, confidence, amount}` guess.
//!
//! Deterministic and order-sensitive. Stages, first hit wins:
//! 1) income keywords, 2) investment keywords, 3) expense keywords,
//! 4) contextual hint words, 5) sign/magnitude of the amount hint.
//! Expense keywords are the most generic, so they are scanned last.

use caixa_core::{FALLBACK_CATEGORY, RecordError, Source, TransactionRecord, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::amount::extract_chat_amount;
use crate::normalize::{normalize, normalize_csv};
use crate::patterns::{CategoryPattern, PatternTable};

/// Keyword passes, in priority order
const PASS_ORDER: [TransactionType; 3] = [
    TransactionType::Income,
    TransactionType::Investment,
    TransactionType::Expense,
];

const HINT_CONFIDENCE: f64 = 0.6;
const NEGATIVE_AMOUNT_CONFIDENCE: f64 = 0.7;
const LARGE_AMOUNT_CONFIDENCE: f64 = 0.5;
const DEFAULT_CONFIDENCE: f64 = 0.4;
/// Confidence reported when a known type has no matching category keyword
const CATEGORY_FALLBACK_CONFIDENCE: f64 = 0.5;

pub const DEFAULT_LARGE_INCOME_THRESHOLD: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub raw_text: String,
    /// Pre-parsed amount (CSV path); negative means money went out
    pub signed_amount: Option<f64>,
}

impl ClassificationInput {
    pub fn chat(text: impl Into<String>) -> Self {
        Self { raw_text: text.into(), signed_amount: None }
    }

    pub fn csv(description: impl Into<String>, signed_amount: f64) -> Self {
        Self { raw_text: description.into(), signed_amount: Some(signed_amount) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    /// Heuristic certainty, not a calibrated probability
    pub confidence: f64,
    /// Magnitude only; 0 means no amount was found
    pub amount: f64,
}

impl ClassificationResult {
    /// Callers must drop results without a positive amount.
    pub fn is_valid(&self) -> bool {
        self.amount > 0.0
    }

    pub fn into_record(
        self,
        date: NaiveDate,
        description: impl Into<String>,
        source: Source,
    ) -> Result<TransactionRecord, RecordError> {
        Ok(TransactionRecord::new(date, self.category, self.amount, self.kind, description, source)?
            .with_confidence(self.confidence))
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    table: PatternTable,
    large_income_threshold: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(PatternTable::default())
    }
}

impl Classifier {
    pub fn new(table: PatternTable) -> Self {
        Self {
            table,
            large_income_threshold: DEFAULT_LARGE_INCOME_THRESHOLD,
        }
    }

    /// Positive hints above this are guessed as income when nothing else matched.
    pub fn with_large_income_threshold(mut self, threshold: f64) -> Self {
        self.large_income_threshold = threshold;
        self
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Classify a chat message. The amount is the last number in the text.
    pub fn classify(&self, raw_text: &str, signed_amount_hint: Option<f64>) -> ClassificationResult {
        let amount = resolve_amount(raw_text, signed_amount_hint);
        self.classify_normalized(&normalize(raw_text), amount, signed_amount_hint)
    }

    /// Classify a CSV description whose amount column was parsed separately.
    pub fn classify_csv(&self, description: &str, signed_amount: f64) -> ClassificationResult {
        let hint = Some(signed_amount);
        let amount = resolve_amount(description, hint);
        self.classify_normalized(&normalize_csv(description), amount, hint)
    }

    pub fn classify_input(&self, input: &ClassificationInput) -> ClassificationResult {
        match input.signed_amount {
            Some(v) => self.classify_csv(&input.raw_text, v),
            None => self.classify(&input.raw_text, None),
        }
    }

    /// Category-only lookup when the type is already known (bank export
    /// credit/debit columns, manual entry). Falls back to `Outros`.
    pub fn category_for(&self, raw_text: &str, kind: TransactionType) -> (String, f64) {
        let text = normalize_csv(raw_text);
        match first_match(self.table.patterns_for(kind), &text) {
            Some(p) => (p.category.clone(), p.confidence),
            None => (FALLBACK_CATEGORY.to_string(), CATEGORY_FALLBACK_CONFIDENCE),
        }
    }

    fn classify_normalized(&self, text: &str, amount: f64, hint: Option<f64>) -> ClassificationResult {
        let (kind, category, confidence) = self.infer(text, hint);
        ClassificationResult { kind, category, confidence, amount }
    }

    fn infer(&self, text: &str, hint: Option<f64>) -> (TransactionType, String, f64) {
        for kind in PASS_ORDER {
            if let Some(p) = first_match(self.table.patterns_for(kind), text) {
                trace!(%kind, category = %p.category, "keyword match");
                return (kind, p.category.clone(), p.confidence);
            }
        }

        if contains_any(text, &self.table.income_hints) {
            trace!("income hint word");
            return (TransactionType::Income, FALLBACK_CATEGORY.to_string(), HINT_CONFIDENCE);
        }
        if contains_any(text, &self.table.expense_hints) {
            trace!("expense hint word");
            return (TransactionType::Expense, FALLBACK_CATEGORY.to_string(), HINT_CONFIDENCE);
        }

        let (kind, confidence) = match hint {
            Some(v) if v < 0.0 => (TransactionType::Expense, NEGATIVE_AMOUNT_CONFIDENCE),
            Some(v) if v > self.large_income_threshold => (TransactionType::Income, LARGE_AMOUNT_CONFIDENCE),
            _ => (TransactionType::Expense, DEFAULT_CONFIDENCE),
        };
        trace!(%kind, ?hint, "magnitude fallback");
        (kind, FALLBACK_CATEGORY.to_string(), confidence)
    }
}

fn resolve_amount(raw_text: &str, hint: Option<f64>) -> f64 {
    match hint {
        Some(v) if v.is_finite() => v.abs(),
        _ => extract_chat_amount(raw_text),
    }
}

/// First category (declaration order) with a keyword contained in `text`
fn first_match<'a>(patterns: &'a [CategoryPattern], text: &str) -> Option<&'a CategoryPattern> {
    patterns
        .iter()
        .find(|p| p.keywords.iter().any(|k| !k.is_empty() && text.contains(k.as_str())))
}

fn contains_any(text: &str, words: &[String]) -> bool {
    words.iter().any(|w| !w.is_empty() && text.contains(w.as_str()))
}
