//! CSV file import: encoding/delimiter sniffing, row iteration and skip bookkeeping.

use anyhow::{Context, Result};
use caixa_finance::Classifier;
use encoding_rs::WINDOWS_1252;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::parsers::parse_row;
use crate::types::{ImportReport, SkippedRow};

/// Decode file bytes: UTF-8 when valid, otherwise Windows-1252 (what Brazilian
/// bank and spreadsheet exports use). A leading BOM is dropped.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => WINDOWS_1252.decode(bytes).0.into_owned(),
    }
}

/// Pick the delimiter occurring most often in the first non-blank line.
/// Ties prefer `;`, the usual choice when amounts use decimal commas.
pub fn detect_delimiter(text: &str) -> u8 {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let count = |c: char| line.matches(c).count();

    [b';', b',', b'\t']
        .into_iter()
        .max_by_key(|&d| (count(d as char), d == b';'))
        .filter(|&d| count(d as char) > 0)
        .unwrap_or(b',')
}

pub fn import_csv_str(text: &str, classifier: &Classifier) -> Result<ImportReport> {
    let delimiter = detect_delimiter(text);
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut report = ImportReport::default();
    let separator = (delimiter as char).to_string();

    for result in rdr.records() {
        let record = result.context("reading CSV row")?;
        let fields: Vec<&str> = record.iter().collect();

        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match parse_row(&fields, classifier) {
            Ok(rec) => report.records.push(rec),
            Err(reason) => {
                debug!(line, %reason, "skipping row");
                report.skipped.push(SkippedRow {
                    line,
                    reason,
                    raw: fields.join(separator.as_str()),
                });
            }
        }
    }

    info!(
        imported = report.records.len(),
        skipped = report.skipped.len(),
        "CSV import finished"
    );
    Ok(report)
}

pub fn import_csv<R: Read>(mut reader: R, classifier: &Classifier) -> Result<ImportReport> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).context("reading CSV input")?;
    import_csv_str(&decode_text(&bytes), classifier)
}

pub fn import_csv_path(path: impl AsRef<Path>, classifier: &Classifier) -> Result<ImportReport> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    import_csv(file, classifier).with_context(|| format!("importing {}", path.display()))
}
