//! Aggregated view of a set of records (dashboard totals)

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthTotal {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub investment: f64,
}

impl MonthTotal {
    pub fn balance(&self) -> f64 {
        self.income - self.expense - self.investment
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub investment: f64,
    /// income - expense - investment
    pub balance: f64,
    pub transaction_count: usize,
    /// Sorted by total descending
    pub by_category: Vec<CategoryTotal>,
    /// Sorted chronologically
    pub by_month: Vec<MonthTotal>,
}
