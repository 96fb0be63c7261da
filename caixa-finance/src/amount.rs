//! Amount extraction from chat messages and CSV fields.
//!
//! Chat messages usually state the value at the end ("uber 23,50"), so the
//! rightmost number wins. CSV fields are already isolated and follow the
//! separator rules of Brazilian and US bank exports (`1.234,56` / `1,234.56`).

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountLocale {
    /// Scan free text; rightmost numeric token wins
    Chat,
    /// A single pre-isolated numeric field
    Csv,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount field")]
    Empty,

    #[error("unparseable amount: {0:?}")]
    Unparseable(String),
}

fn chat_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+[.,]?\d*").expect("invalid amount regex"))
}

/// Locale-dispatching extractor. Never fails: anything unparseable is 0.
///
/// In `Csv` mode the sign of the field is kept; use [`parse_csv_amount`]
/// directly when a malformed field must be told apart from a zero.
pub fn extract_amount(text: &str, locale: AmountLocale) -> f64 {
    match locale {
        AmountLocale::Chat => extract_chat_amount(text),
        AmountLocale::Csv => parse_csv_amount(text).unwrap_or(0.0),
    }
}

/// Last `\d+[.,]?\d*` token of `text`, comma read as decimal point.
/// Returns 0 when the text holds no number.
pub fn extract_chat_amount(text: &str) -> f64 {
    chat_amount_re()
        .find_iter(text)
        .last()
        .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(f64::abs)
        .unwrap_or(0.0)
}

/// Parse one CSV amount field, keeping its sign.
///
/// Rules, in order:
/// 1. currency symbols and whitespace are dropped
/// 2. with both `.` and `,`, the last one is the decimal separator
/// 3. a lone `,` is decimal only when exactly two digits follow it
/// 4. a lone `.` is decimal only when exactly two digits follow it
/// 5. anything but digits, `.` and `-` is dropped
pub fn parse_csv_amount(field: &str) -> Result<f64, AmountError> {
    let stripped: String = field
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | '€' | '£' | '¥'))
        .collect();

    if stripped.is_empty() {
        return Err(AmountError::Empty);
    }

    let has_dot = stripped.contains('.');
    let has_comma = stripped.contains(',');

    let separated = match (has_dot, has_comma) {
        (true, true) => {
            let last_dot = stripped.rfind('.').unwrap_or(0);
            let last_comma = stripped.rfind(',').unwrap_or(0);
            if last_comma > last_dot {
                stripped.replace('.', "").replace(',', ".")
            } else {
                stripped.replace(',', "")
            }
        }
        (false, true) => resolve_single_separator(&stripped, ','),
        (true, false) => resolve_single_separator(&stripped, '.'),
        (false, false) => stripped,
    };

    let cleaned: String = separated
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AmountError::Unparseable(field.trim().to_string())),
    }
}

/// Decide whether the only separator kind present is decimal or thousands.
fn resolve_single_separator(s: &str, sep: char) -> String {
    let Some(idx) = s.rfind(sep) else {
        return s.to_string();
    };
    let (head, tail) = s.split_at(idx);
    let decimals = &tail[sep.len_utf8()..];

    if decimals.len() == 2 && decimals.chars().all(|c| c.is_ascii_digit()) {
        format!("{}.{}", head.replace(sep, ""), decimals)
    } else {
        s.replace(sep, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_takes_last_number() {
        assert_eq!(extract_amount("Comprei tênis por 450 reais", AmountLocale::Chat), 450.0);
        assert_eq!(extract_chat_amount("2 pizzas por 89,90"), 89.9);
        assert_eq!(extract_chat_amount("uber 23.5"), 23.5);
        assert_eq!(extract_chat_amount("paguei 12,50."), 12.5);
    }

    #[test]
    fn test_chat_without_number_is_zero() {
        assert_eq!(extract_chat_amount("xyz"), 0.0);
        assert_eq!(extract_chat_amount(""), 0.0);
    }

    #[test]
    fn test_chat_amount_is_never_negative() {
        assert_eq!(extract_chat_amount("saldo -30"), 30.0);
    }

    #[test]
    fn test_csv_separator_rules() {
        assert_eq!(extract_amount("1.234,56", AmountLocale::Csv), 1234.56);
        assert_eq!(extract_amount("1,234.56", AmountLocale::Csv), 1234.56);
        assert_eq!(extract_amount("123,45", AmountLocale::Csv), 123.45);
        assert_eq!(extract_amount("1234", AmountLocale::Csv), 1234.0);
        assert_eq!(parse_csv_amount("1,234").unwrap(), 1234.0);
        assert_eq!(parse_csv_amount("1.234").unwrap(), 1234.0);
        assert_eq!(parse_csv_amount("99.90").unwrap(), 99.9);
        assert_eq!(parse_csv_amount("1.234.567,89").unwrap(), 1234567.89);
    }

    #[test]
    fn test_csv_currency_and_sign() {
        assert_eq!(parse_csv_amount("R$ 1.500,00").unwrap(), 1500.0);
        assert_eq!(parse_csv_amount("-45,90").unwrap(), -45.9);
        assert_eq!(parse_csv_amount("R$\u{a0}-12,00").unwrap(), -12.0);
        assert_eq!(parse_csv_amount("$ 3,000.10").unwrap(), 3000.1);
    }

    #[test]
    fn test_csv_malformed_is_signalled() {
        assert_eq!(parse_csv_amount(""), Err(AmountError::Empty));
        assert_eq!(parse_csv_amount("   "), Err(AmountError::Empty));
        assert_eq!(parse_csv_amount("abc"), Err(AmountError::Unparseable("abc".to_string())));
        assert!(parse_csv_amount("--").is_err());
        // malformed fields collapse to zero only through the lenient extractor
        assert_eq!(extract_amount("n/a", AmountLocale::Csv), 0.0);
    }
}
