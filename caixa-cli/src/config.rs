use anyhow::{Context, Result};
use caixa_finance::{Classifier, PatternTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::state::{ensure_caixa_home, read_text, write_text};

pub const VERIFY_TOKEN_ENV: &str = "CAIXA_WHATSAPP_VERIFY_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierSection,
    pub whatsapp: WhatsappSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierSection {
    /// TOML keyword table replacing the built-in vocabulary
    pub keywords_file: Option<PathBuf>,
    /// Positive amounts above this are guessed as income when nothing else matches
    pub large_income_threshold: f64,
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            keywords_file: None,
            large_income_threshold: caixa_finance::classifier::DEFAULT_LARGE_INCOME_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WhatsappSection {
    /// Webhook handshake token; `CAIXA_WHATSAPP_VERIFY_TOKEN` takes precedence
    pub verify_token: Option<String>,
}

impl Config {
    pub fn verify_token(&self) -> Option<String> {
        std::env::var(VERIFY_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.whatsapp.verify_token.clone().filter(|t| !t.is_empty()))
    }

    pub fn build_classifier(&self) -> Result<Classifier> {
        let table = match &self.classifier.keywords_file {
            Some(path) => PatternTable::load(path)
                .with_context(|| format!("loading keyword table {}", path.display()))?,
            None => PatternTable::default(),
        };
        Ok(Classifier::new(table).with_large_income_threshold(self.classifier.large_income_threshold))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_caixa_home()?.join("config.toml"))
}

/// Load `path`, or the default location; a missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = read_text(&p)?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    write_text(path, &s)
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caixa_core::TransactionType;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.classifier.large_income_threshold, 1000.0);
    }

    #[test]
    fn test_round_trip_and_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[whatsapp]\nverify_token = \"abc\"\n").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.whatsapp.verify_token.as_deref(), Some("abc"));
        assert_eq!(cfg.classifier.large_income_threshold, 1000.0);

        let mut changed = cfg.clone();
        changed.classifier.large_income_threshold = 500.0;
        save_config(&changed, &path).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), changed);
    }

    #[test]
    fn test_keywords_file_feeds_classifier() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("keywords.toml");
        std::fs::write(
            &table,
            "[[expense]]\ncategory = \"Pets\"\nconfidence = 0.9\nkeywords = [\"petshop\"]\n",
        )
        .unwrap();
        let cfg = Config {
            classifier: ClassifierSection { keywords_file: Some(table), large_income_threshold: 1000.0 },
            ..Config::default()
        };
        let c = cfg.build_classifier().unwrap();
        let r = c.classify("petshop 120", None);
        assert_eq!((r.kind, r.category.as_str()), (TransactionType::Expense, "Pets"));
    }

    #[test]
    fn test_bad_keywords_file_is_an_error() {
        let cfg = Config {
            classifier: ClassifierSection {
                keywords_file: Some(PathBuf::from("/nonexistent/keywords.toml")),
                large_income_threshold: 1000.0,
            },
            ..Config::default()
        };
        let err = cfg.build_classifier().unwrap_err();
        assert!(err.to_string().contains("loading keyword table"));
    }
}
