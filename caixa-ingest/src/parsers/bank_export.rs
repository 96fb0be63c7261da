//! 7-column bank export:
//!   Data;Lançamento;Detalhes;Documento;Crédito;Débito;Saldo
//!
//! The credit/debit columns decide the type outright; the description is
//! only used to pick a category within that type.

use caixa_core::{Source, TransactionRecord, TransactionType};
use caixa_finance::{AmountError, Classifier, parse_csv_amount};
use chrono::NaiveDate;
use tracing::trace;

use crate::types::SkipReason;

const DESCRIPTION: usize = 1;
const DETAIL: usize = 2;
const CREDIT: usize = 4;
const DEBIT: usize = 5;

/// Empty cells are common in these exports and mean zero.
fn column_amount(field: &str) -> Result<f64, SkipReason> {
    match parse_csv_amount(field) {
        Ok(v) => Ok(v.abs()),
        Err(AmountError::Empty) => Ok(0.0),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn parse(date: NaiveDate, fields: &[&str], classifier: &Classifier) -> Result<TransactionRecord, SkipReason> {
    let credit = column_amount(fields[CREDIT])?;
    let debit = column_amount(fields[DEBIT])?;

    let (kind, amount) = match (credit > 0.0, debit > 0.0) {
        (true, false) => (TransactionType::Income, credit),
        (false, true) => (TransactionType::Expense, debit),
        (true, true) => return Err(SkipReason::BothAmounts),
        (false, false) => return Err(SkipReason::NoAmount),
    };

    let description = match fields[DETAIL].trim() {
        "" => fields[DESCRIPTION].trim().to_string(),
        detail => format!("{} {}", fields[DESCRIPTION].trim(), detail),
    };

    let (category, confidence) = classifier.category_for(&description, kind);
    trace!(%description, amount, %kind, %category, "bank export row");

    TransactionRecord::new(date, category, amount, kind, description, Source::Csv)
        .map(|r| r.with_confidence(confidence))
        .map_err(|_| SkipReason::NoAmount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn test_credit_column_forces_income() {
        let c = Classifier::default();
        // "Pagamento" alone would lean towards expense
        let row = ["01/04/2025", "Pagamento recebido", "", "", "150,00", "0", "950,00"];
        let r = parse(date(), &row, &c).unwrap();
        assert_eq!(r.kind, TransactionType::Income);
        assert_eq!(r.amount, 150.0);
        assert_eq!(r.category, "Outros");
    }

    #[test]
    fn test_debit_column_with_category() {
        let c = Classifier::default();
        let row = ["01/04/2025", "Compra cartão", "POSTO SHELL GASOLINA", "000123", "", "-180,00", "770,00"];
        let r = parse(date(), &row, &c).unwrap();
        assert_eq!(r.kind, TransactionType::Expense);
        assert_eq!(r.amount, 180.0);
        // Transporte is declared before Cartão/Pagamentos
        assert_eq!(r.category, "Transporte");
        assert_eq!(r.description, "Compra cartão POSTO SHELL GASOLINA");
        assert_eq!(r.confidence, 0.9);
    }

    #[test]
    fn test_salary_credit() {
        let c = Classifier::default();
        let row = ["05/04/2025", "PIX RECEBIDO", "Salario ACME", "", "R$ 5.000,00", "", ""];
        let r = parse(date(), &row, &c).unwrap();
        assert_eq!((r.kind, r.category.as_str()), (TransactionType::Income, "Salário"));
    }

    #[test]
    fn test_empty_or_zero_columns_are_skipped() {
        let c = Classifier::default();
        let row = ["01/04/2025", "Saldo anterior", "", "", "", "", "1.000,00"];
        assert_eq!(parse(date(), &row, &c), Err(SkipReason::NoAmount));
        let row = ["01/04/2025", "Tarifa", "", "", "0,00", "0", ""];
        assert_eq!(parse(date(), &row, &c), Err(SkipReason::NoAmount));
    }

    #[test]
    fn test_both_columns_filled_is_skipped() {
        let c = Classifier::default();
        let row = ["01/04/2025", "Ajuste", "", "", "10,00", "5,00", ""];
        assert_eq!(parse(date(), &row, &c), Err(SkipReason::BothAmounts));
    }

    #[test]
    fn test_malformed_column_is_skipped() {
        let c = Classifier::default();
        let row = ["01/04/2025", "Ajuste", "", "", "dez reais", "", ""];
        assert!(matches!(parse(date(), &row, &c), Err(SkipReason::BadAmount(_))));
    }
}
