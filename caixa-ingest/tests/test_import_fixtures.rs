use caixa_core::{Source, TransactionType};
use caixa_finance::Classifier;
use caixa_ingest::{SkipReason, import_csv_path};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

#[test]
fn test_bank_export_fixture() {
    let report = import_csv_path(fixture("extrato_banco.csv"), &Classifier::default()).unwrap();

    // header, saldo anterior, zero tarifa, corrupted date
    assert_eq!(report.skipped.len(), 4);
    assert_eq!(report.records.len(), 10);
    assert!(report.records.iter().all(|r| r.source == Source::Csv));

    let find = |needle: &str| {
        report
            .records
            .iter()
            .find(|r| r.description.contains(needle))
            .unwrap_or_else(|| panic!("missing {needle}"))
    };

    // credit column wins over the "Pagamento" wording
    let client = find("Pagamento cliente");
    assert_eq!(client.kind, TransactionType::Income);
    assert_eq!(client.amount, 1200.0);

    let salary = find("ACME");
    assert_eq!((salary.kind, salary.category.as_str()), (TransactionType::Income, "Salário"));

    let market = find("SUPERMERCADO");
    assert_eq!((market.kind, market.category.as_str()), (TransactionType::Expense, "Alimentação"));
    assert_eq!(market.amount, 412.87);

    // debit column: type stays expense even though the text says CDB
    let cdb = find("CDB");
    assert_eq!((cdb.kind, cdb.category.as_str()), (TransactionType::Expense, "Outros"));

    let refund = find("Estorno");
    assert_eq!((refund.kind, refund.category.as_str()), (TransactionType::Income, "Reembolso"));

    assert_eq!(find("CONDOMINIO").category, "Moradia");
    assert_eq!(find("FARMACIA").category, "Saúde");
    assert_eq!(find("NETFLIX").category, "Lazer");
    assert_eq!(find("PIX ENVIADO").category, "Transferência Enviada");

    let corrupted = report.skipped.iter().find(|s| s.raw.contains("corrompida")).unwrap();
    assert!(matches!(corrupted.reason, SkipReason::BadDate(_)));
    let tarifa = report.skipped.iter().find(|s| s.raw.contains("Tarifa")).unwrap();
    assert_eq!(tarifa.reason, SkipReason::NoAmount);
}

#[test]
fn test_generic_fixture() {
    let report = import_csv_path(fixture("planilha.csv"), &Classifier::default()).unwrap();
    assert_eq!(report.records.len(), 10);
    assert_eq!(report.skipped.len(), 3);

    let kinds: Vec<(TransactionType, &str)> = report
        .records
        .iter()
        .map(|r| (r.kind, r.category.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (TransactionType::Income, "Salário"),
            (TransactionType::Expense, "Moradia"),
            (TransactionType::Expense, "Alimentação"),
            (TransactionType::Income, "Freelance"),
            (TransactionType::Investment, "Banco"),
            (TransactionType::Investment, "Criptomoedas"),
            (TransactionType::Expense, "Lazer"),
            (TransactionType::Expense, "Outros"),
            (TransactionType::Income, "Vendas"),
            (TransactionType::Income, "Outros"),
        ]
    );

    // amounts are magnitudes; direction lives in the type
    assert!(report.records.iter().all(|r| r.amount > 0.0));
    assert_eq!(report.records[2].amount, 312.45);

    let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason.clone()).collect();
    assert!(matches!(reasons[0], SkipReason::BadDate(_)));
    assert!(matches!(reasons[1], SkipReason::BadAmount(_)));
    assert_eq!(reasons[2], SkipReason::ColumnCount(2));
}
