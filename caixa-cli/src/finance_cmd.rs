use anyhow::{Context, Result, bail};
use caixa_core::{Source, Summary, TransactionRecord, TransactionType, format_brl};
use caixa_finance::{ClassificationResult, Classifier, parse_csv_amount, summarize};
use caixa_ingest::{ImportReport, import_csv_path, parse_date};
use chrono::{Local, NaiveDate};
use std::path::Path;
use tracing::info;

use crate::state::write_text;

pub fn classify(classifier: &Classifier, text: &str, amount: Option<&str>, json: bool) -> Result<()> {
    let result = match amount {
        Some(a) => {
            let hint = parse_csv_amount(a).with_context(|| format!("invalid --amount {a:?}"))?;
            classifier.classify_csv(text, hint)
        }
        None => classifier.classify(text, None),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", describe(&result));
        if !result.is_valid() {
            println!("(no amount found: this would not be recorded)");
        }
    }
    Ok(())
}

fn describe(r: &ClassificationResult) -> String {
    format!(
        "type={} category={} confidence={:.2} amount={}",
        r.kind,
        r.category,
        r.confidence,
        format_brl(r.amount)
    )
}

/// Build a manual record; the category comes from the description when not given.
pub fn build_manual_record(
    classifier: &Classifier,
    amount: &str,
    kind: &str,
    category: Option<&str>,
    date: Option<NaiveDate>,
    description: &str,
) -> Result<TransactionRecord> {
    let amount = parse_csv_amount(amount).with_context(|| format!("invalid amount {amount:?}"))?;
    if amount <= 0.0 {
        bail!("amount must be positive (the type carries the direction)");
    }
    let kind: TransactionType = kind.parse()?;
    let category = match category {
        Some(c) => c.trim().to_string(),
        None => classifier.category_for(description, kind).0,
    };
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    Ok(TransactionRecord::new(date, category, amount, kind, description, Source::Manual)?)
}

pub fn add(
    classifier: &Classifier,
    amount: &str,
    kind: &str,
    category: Option<&str>,
    date: Option<&str>,
    description: &str,
) -> Result<()> {
    let date = match date {
        Some(d) => Some(parse_date(d).with_context(|| format!("invalid date {d:?}"))?),
        None => None,
    };
    let record = build_manual_record(classifier, amount, kind, category, date, description)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub fn import(classifier: &Classifier, csv: &Path, out: Option<&Path>, show_skipped: bool) -> Result<()> {
    let report = load_report(classifier, csv)?;

    let json = serde_json::to_string_pretty(&report.records)?;
    match out {
        Some(path) => {
            write_text(path, &json)?;
            info!(path = %path.display(), records = report.records.len(), "records written");
        }
        None => println!("{json}"),
    }

    eprintln!(
        "Imported {} of {} rows from {} ({} skipped)",
        report.records.len(),
        report.total_rows(),
        csv.display(),
        report.skipped.len()
    );
    if show_skipped {
        for s in &report.skipped {
            eprintln!("  line {}: {} | {}", s.line, s.reason, s.raw);
        }
    }
    Ok(())
}

pub fn summary(classifier: &Classifier, csv: &Path, json: bool) -> Result<()> {
    let report = load_report(classifier, csv)?;
    let summary = summarize(&report.records);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }
    Ok(())
}

fn load_report(classifier: &Classifier, csv: &Path) -> Result<ImportReport> {
    if !csv.exists() {
        bail!("CSV not found: {}", csv.display());
    }
    import_csv_path(csv, classifier)
}

pub fn render_summary(s: &Summary) -> String {
    let mut out = String::new();
    out.push_str("# Resumo\n\n");
    out.push_str(&format!("Receitas:      {:>16}\n", format_brl(s.income)));
    out.push_str(&format!("Despesas:      {:>16}\n", format_brl(s.expense)));
    out.push_str(&format!("Investimentos: {:>16}\n", format_brl(s.investment)));
    out.push_str(&format!("Saldo:         {:>16}\n", format_brl(s.balance)));
    out.push_str(&format!("Transações:    {:>16}\n", s.transaction_count));

    if !s.by_category.is_empty() {
        out.push_str("\n## Por categoria\n\n");
        for c in &s.by_category {
            out.push_str(&format!(
                "- [{}] {}: {} ({}x)\n",
                c.kind.label_pt(),
                c.category,
                format_brl(c.total),
                c.count
            ));
        }
    }

    if !s.by_month.is_empty() {
        out.push_str("\n## Por mês\n\n");
        for m in &s.by_month {
            out.push_str(&format!(
                "- {}: +{} / -{} / inv {} = {}\n",
                m.month,
                format_brl(m.income),
                format_brl(m.expense),
                format_brl(m.investment),
                format_brl(m.balance())
            ));
        }
    }
    out
}
