//! Keyword pattern table: the classifier's vocabulary, kept as data.
//!
//! Each transaction type owns an ordered list of categories, each with an
//! ordered keyword list and the confidence reported on a hit. Order matters:
//! when a text contains keywords of two categories, the one declared first
//! wins. The built-in table can be replaced by a TOML file with the same shape:
//!
//! ```toml
//! income_hints = ["credito", "deposito"]
//! expense_hints = ["debito", "pagamento"]
//!
//! [[income]]
//! category = "Salário"
//! confidence = 0.95
//! keywords = ["salario", "holerite"]
//! ```

use caixa_core::{FALLBACK_CATEGORY, TransactionType};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::normalize::normalize;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("reading keyword table: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing keyword table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("category name must not be empty")]
    EmptyCategory,

    #[error("category {0:?} has no keywords")]
    NoKeywords(String),

    #[error("category {category:?} has confidence {value} outside [0, 1]")]
    InvalidConfidence { category: String, value: f64 },
}

/// One category and the keywords that select it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryPattern {
    pub category: String,
    pub confidence: f64,
    pub keywords: Vec<String>,
}

/// Ordered vocabulary scanned by the classifier (income, then investment, then expense)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternTable {
    #[serde(default)]
    pub income: Vec<CategoryPattern>,
    #[serde(default)]
    pub investment: Vec<CategoryPattern>,
    #[serde(default)]
    pub expense: Vec<CategoryPattern>,
    /// Weak words implying money coming in ("credito", "deposito")
    #[serde(default)]
    pub income_hints: Vec<String>,
    /// Weak words implying money going out ("debito", "saque")
    #[serde(default)]
    pub expense_hints: Vec<String>,
}

type Entry = (&'static str, f64, &'static [&'static str]);

const INCOME: &[Entry] = &[
    ("Salário", 0.95, &["salario", "salarial", "holerite", "contracheque", "folha de pagamento", "decimo terceiro"]),
    ("Transferência Recebida", 0.9, &[
        "pix recebido", "transferencia recebida", "ted recebida", "doc recebido",
        "recebi um pix", "recebi pix", "recebi transferencia",
    ]),
    ("Freelance", 0.9, &["freelance", "freela", "consultoria", "honorarios", "servico prestado", "bico"]),
    ("Vendas", 0.85, &["vendi", "venda", "vendas"]),
    ("Reembolso", 0.8, &["reembolso", "estorno", "devolucao", "cashback", "ressarcimento"]),
];

const INVESTMENT: &[Entry] = &[
    ("Banco", 0.9, &["poupanca", "cdb", "letra de credito", "tesouro", "renda fixa", "aplicacao"]),
    ("Corretora", 0.9, &["corretora", "bolsa de valores", "comprei acoes", "fundo imobiliario", "fii", "b3"]),
    ("Criptomoedas", 0.85, &["bitcoin", "btc", "cripto", "ethereum", "binance", "usdt"]),
];

const EXPENSE: &[Entry] = &[
    ("Alimentação", 0.9, &[
        "mercado", "supermercado", "ifood", "uber eats", "restaurante", "lanche",
        "padaria", "almoco", "jantar", "pizza", "acougue", "cafe",
    ]),
    ("Transporte", 0.9, &[
        "uber", "99pop", "taxi", "onibus", "metro", "gasolina", "combustivel",
        "estacionamento", "pedagio", "passagem",
    ]),
    ("Moradia", 0.9, &["aluguel", "condominio", "conta de luz", "energia", "conta de agua", "internet", "iptu", "botijao"]),
    ("Saúde", 0.85, &["farmacia", "remedio", "medico", "consulta", "hospital", "dentista", "plano de saude", "exame", "academia"]),
    ("Educação", 0.85, &["escola", "faculdade", "curso", "livro", "mensalidade", "material escolar"]),
    ("Lazer", 0.8, &["cinema", "netflix", "spotify", "show", "viagem", "balada", "ingresso", "passeio", "hotel"]),
    ("Vestuário", 0.85, &["roupa", "tenis", "sapato", "camisa", "calca", "vestido"]),
    ("Cartão/Pagamentos", 0.9, &["fatura", "cartao", "boleto", "anuidade", "emprestimo", "parcela"]),
    ("Transferência Enviada", 0.9, &[
        "pix enviado", "transferencia enviada", "ted enviada", "enviei pix", "enviei um pix", "transferi",
    ]),
];

const INCOME_HINTS: &[&str] = &["credito", "deposito", "recebido", "recebi", "recebimento"];
const EXPENSE_HINTS: &[&str] = &["debito", "pagamento", "compra", "saque", "paguei", "gastei", "comprei"];

fn build(entries: &[Entry]) -> Vec<CategoryPattern> {
    entries
        .iter()
        .map(|(category, confidence, keywords)| CategoryPattern {
            category: category.to_string(),
            confidence: *confidence,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for PatternTable {
    fn default() -> Self {
        Self {
            income: build(INCOME),
            investment: build(INVESTMENT),
            expense: build(EXPENSE),
            income_hints: owned(INCOME_HINTS),
            expense_hints: owned(EXPENSE_HINTS),
        }
    }
}

impl PatternTable {
    /// Parse a TOML table, normalizing keywords so accented entries still match.
    pub fn from_toml_str(s: &str) -> Result<Self, TableError> {
        let mut table: PatternTable = toml::from_str(s)?;
        table.normalize_keywords();
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let s = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        for p in self.income.iter().chain(&self.investment).chain(&self.expense) {
            if p.category.trim().is_empty() {
                return Err(TableError::EmptyCategory);
            }
            if p.keywords.iter().all(|k| k.is_empty()) {
                return Err(TableError::NoKeywords(p.category.clone()));
            }
            if !(0.0..=1.0).contains(&p.confidence) {
                return Err(TableError::InvalidConfidence {
                    category: p.category.clone(),
                    value: p.confidence,
                });
            }
        }
        Ok(())
    }

    /// Patterns declared for one transaction type, in scan order
    pub fn patterns_for(&self, kind: TransactionType) -> &[CategoryPattern] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Investment => &self.investment,
            TransactionType::Expense => &self.expense,
        }
    }

    /// Recognized categories for a type; always ends with the fallback.
    pub fn categories_for(&self, kind: TransactionType) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .patterns_for(kind)
            .iter()
            .map(|p| p.category.as_str())
            .collect();
        out.push(FALLBACK_CATEGORY);
        out
    }

    fn normalize_keywords(&mut self) {
        for p in self
            .income
            .iter_mut()
            .chain(self.investment.iter_mut())
            .chain(self.expense.iter_mut())
        {
            p.category = p.category.trim().to_string();
            for k in p.keywords.iter_mut() {
                *k = normalize(k.trim());
            }
            p.keywords.retain(|k| !k.is_empty());
        }
        for hints in [&mut self.income_hints, &mut self.expense_hints] {
            for h in hints.iter_mut() {
                *h = normalize(h.trim());
            }
            hints.retain(|h| !h.is_empty());
        }
    }
}
