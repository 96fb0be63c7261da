//! Text normalization for keyword matching.
//!
//! Matching is accent- and case-insensitive: "Poupança", "POUPANCA" and
//! "poupanca" all normalize to the same string.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lower-case and strip diacritics (NFD + combining mark removal).
/// Punctuation is kept; chat messages match fine with it in place.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// `normalize` plus punctuation folded to single spaces and whitespace collapsed.
/// Used for CSV descriptions, which are full of `*`, `-` and `/` separators.
pub fn normalize_csv(text: &str) -> String {
    let folded: String = normalize(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("Poupança"), "poupanca");
        assert_eq!(normalize("SALÁRIO"), "salario");
        assert_eq!(normalize("mercádo"), "mercado");
        assert_eq!(normalize("Ônibus até Jundiaí"), "onibus ate jundiai");
    }

    #[test]
    fn test_chat_path_keeps_punctuation() {
        assert_eq!(normalize("Gastei R$ 50,00 no iFood!"), "gastei r$ 50,00 no ifood!");
    }

    #[test]
    fn test_csv_path_folds_punctuation() {
        assert_eq!(normalize_csv("  PIX*Recebido -- João/Silva  "), "pix recebido joao silva");
        assert_eq!(normalize_csv("UBER *TRIP"), "uber trip");
    }

    #[test]
    fn test_empty_and_idempotent() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize_csv(""), "");
        let once = normalize("Farmácia São João");
        assert_eq!(normalize(&once), once);
    }
}
