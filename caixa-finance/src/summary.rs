//! Dashboard aggregation: totals per type, per category and per month.

use caixa_core::{CategoryTotal, MonthTotal, Summary, TransactionRecord, TransactionType};
use std::collections::{BTreeMap, HashMap};

pub fn summarize(records: &[TransactionRecord]) -> Summary {
    let mut summary = Summary {
        transaction_count: records.len(),
        ..Summary::default()
    };

    let mut categories: HashMap<(TransactionType, String), (f64, usize)> = HashMap::new();
    // BTreeMap keeps months in chronological order ("YYYY-MM" sorts lexically)
    let mut months: BTreeMap<String, MonthTotal> = BTreeMap::new();

    for r in records {
        let month = months
            .entry(r.date.format("%Y-%m").to_string())
            .or_insert_with_key(|key| MonthTotal {
                month: key.clone(),
                income: 0.0,
                expense: 0.0,
                investment: 0.0,
            });

        match r.kind {
            TransactionType::Income => {
                summary.income += r.amount;
                month.income += r.amount;
            }
            TransactionType::Expense => {
                summary.expense += r.amount;
                month.expense += r.amount;
            }
            TransactionType::Investment => {
                summary.investment += r.amount;
                month.investment += r.amount;
            }
        }

        let entry = categories.entry((r.kind, r.category.clone())).or_insert((0.0, 0));
        entry.0 += r.amount;
        entry.1 += 1;
    }

    summary.balance = records.iter().map(TransactionRecord::signed_amount).sum();

    let mut by_category: Vec<CategoryTotal> = categories
        .into_iter()
        .map(|((kind, category), (total, count))| CategoryTotal { kind, category, total, count })
        .collect();
    // Largest first; ties broken by type then name so output is stable
    by_category.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.category.cmp(&b.category))
    });

    summary.by_category = by_category;
    summary.by_month = months.into_values().collect();
    summary
}
