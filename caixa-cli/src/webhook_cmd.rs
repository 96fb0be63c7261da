use anyhow::{Context, Result};
use caixa_finance::Classifier;
use caixa_whatsapp::{MessageHandler, Outcome, VerifyQuery, inbound_messages, parse_payload, verify_subscription};
use chrono::Local;
use std::path::Path;
use tracing::warn;

use crate::config::{Config, VERIFY_TOKEN_ENV};
use crate::state::read_text;

pub fn verify(cfg: &Config, mode: String, token: String, challenge: String) -> Result<()> {
    let expected = cfg.verify_token().unwrap_or_default();
    let query = VerifyQuery {
        mode: Some(mode),
        verify_token: Some(token),
        challenge: Some(challenge),
    };
    let echoed = verify_subscription(&query, &expected)
        .with_context(|| format!("webhook verification failed (token from [whatsapp] verify_token or {VERIFY_TOKEN_ENV})"))?;
    println!("{echoed}");
    Ok(())
}

pub fn handle(classifier: &Classifier, payload: &Path) -> Result<()> {
    let json = read_text(payload)?;
    let payload = parse_payload(&json)?;
    let handler = MessageHandler::new(classifier);
    let today = Local::now().date_naive();

    let mut records = Vec::new();
    for msg in inbound_messages(&payload) {
        let outcome = handler.handle(&msg, today);
        if let Outcome::NeedsTranscription { media_id } = &outcome {
            warn!(from = %msg.from, %media_id, "audio message skipped: no transcription service configured");
        }
        if let Some(reply) = outcome.reply() {
            eprintln!("→ {}:\n{}\n", msg.from, reply);
        }
        if let Some(record) = outcome.record() {
            records.push(record.clone());
        }
    }

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
