//! Message → record. Shared by the webhook and the simulator so both use the
//! exact same classifier and reply wording.

use caixa_core::{Source, TransactionRecord, TransactionType, format_brl};
use caixa_finance::{Classifier, normalize};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::payload::{InboundMessage, MessageBody};

const HELP_WORDS: [&str; 4] = ["ajuda", "help", "menu", "?"];

const HELP_REPLY: &str = "Envie uma mensagem com a descrição e o valor, por exemplo:\n\
    • Gastei 50 no mercado\n\
    • Recebi 800 de freelance\n\
    • Investi 200 na poupança";

const NO_AMOUNT_REPLY: &str = "❌ Não encontrei o valor na sua mensagem.\n\
    Tente algo como: \"Gastei 50 no mercado\".";

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Classified with a positive amount; hand `record` to storage and send `reply`
    Recorded { record: TransactionRecord, reply: String },
    /// No usable amount; nothing to store
    Rejected { reply: String },
    /// Help text requested
    Help { reply: String },
    /// Voice note: transcribe it, then feed the text to `handle_text`
    NeedsTranscription { media_id: String },
    /// Message type we do not handle
    Ignored,
}

impl Outcome {
    pub fn reply(&self) -> Option<&str> {
        match self {
            Outcome::Recorded { reply, .. } | Outcome::Rejected { reply } | Outcome::Help { reply } => Some(reply.as_str()),
            Outcome::NeedsTranscription { .. } | Outcome::Ignored => None,
        }
    }

    pub fn record(&self) -> Option<&TransactionRecord> {
        match self {
            Outcome::Recorded { record, .. } => Some(record),
            _ => None,
        }
    }
}

pub struct MessageHandler<'a> {
    classifier: &'a Classifier,
}

impl<'a> MessageHandler<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        Self { classifier }
    }

    /// Handle one inbound message. The record date is the message timestamp
    /// when present, `today` otherwise.
    pub fn handle(&self, msg: &InboundMessage, today: NaiveDate) -> Outcome {
        let date = msg.timestamp.map(|t| t.date_naive()).unwrap_or(today);
        match &msg.body {
            MessageBody::Text(text) => self.handle_text(text, date),
            MessageBody::Audio { media_id, .. } => {
                debug!(from = %msg.from, %media_id, "audio message needs transcription");
                Outcome::NeedsTranscription { media_id: media_id.clone() }
            }
            MessageBody::Other(kind) => {
                debug!(from = %msg.from, %kind, "ignoring message type");
                Outcome::Ignored
            }
        }
    }

    pub fn handle_text(&self, text: &str, date: NaiveDate) -> Outcome {
        let text = text.trim();
        if HELP_WORDS.contains(&normalize(text).as_str()) {
            return Outcome::Help { reply: HELP_REPLY.to_string() };
        }

        let result = self.classifier.classify(text, None);
        if !result.is_valid() {
            warn!(text, "message without amount rejected");
            return Outcome::Rejected { reply: NO_AMOUNT_REPLY.to_string() };
        }

        match result.into_record(date, text, Source::Whatsapp) {
            Ok(record) => {
                let reply = format_reply(&record);
                Outcome::Recorded { record, reply }
            }
            Err(e) => {
                warn!(text, error = %e, "message rejected");
                Outcome::Rejected { reply: NO_AMOUNT_REPLY.to_string() }
            }
        }
    }
}

/// Confirmation sent back to the user.
pub fn format_reply(record: &TransactionRecord) -> String {
    let registered = match record.kind {
        TransactionType::Investment => "registrado",
        TransactionType::Income | TransactionType::Expense => "registrada",
    };
    format!(
        "✅ {} {}!\n💰 Valor: {}\n📂 Categoria: {}\n📝 {}\n📅 {}",
        record.kind.label_pt(),
        registered,
        format_brl(record.amount),
        record.category,
        record.description,
        record.date.format("%d/%m/%Y"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn text_msg(body: &str, timestamp: Option<DateTime<Utc>>) -> InboundMessage {
        InboundMessage {
            id: "wamid.1".to_string(),
            from: "5511999990000".to_string(),
            timestamp,
            body: MessageBody::Text(body.to_string()),
        }
    }

    #[test]
    fn test_records_expense_with_reply() {
        let c = Classifier::default();
        let out = MessageHandler::new(&c).handle(&text_msg("Gastei 50 no mercado", None), today());
        let record = out.record().unwrap();
        assert_eq!(record.kind, TransactionType::Expense);
        assert_eq!(record.category, "Alimentação");
        assert_eq!(record.amount, 50.0);
        assert_eq!(record.source, Source::Whatsapp);
        assert_eq!(record.date, today());

        let reply = out.reply().unwrap();
        assert!(reply.contains("Despesa registrada"));
        assert!(reply.contains("R$ 50,00"));
        assert!(reply.contains("Alimentação"));
        assert!(reply.contains("20/03/2025"));
    }

    #[test]
    fn test_message_timestamp_sets_date() {
        let c = Classifier::default();
        // 2025-03-03T11:06:40Z
        let ts = DateTime::from_timestamp(1_741_000_000, 0);
        let out = MessageHandler::new(&c).handle(&text_msg("Recebi 800 de freelance", ts), today());
        let record = out.record().unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(record.category, "Freelance");
        assert!(out.reply().unwrap().starts_with("✅ Receita registrada!"));
    }

    #[test]
    fn test_rejects_without_amount() {
        let c = Classifier::default();
        let out = MessageHandler::new(&c).handle_text("gastei no mercado", today());
        assert!(matches!(out, Outcome::Rejected { .. }));
        assert!(out.record().is_none());
    }

    #[test]
    fn test_help() {
        let c = Classifier::default();
        let out = MessageHandler::new(&c).handle_text(" Ajuda ", today());
        assert!(matches!(out, Outcome::Help { .. }));
    }

    #[test]
    fn test_audio_and_other() {
        let c = Classifier::default();
        let h = MessageHandler::new(&c);
        let audio = InboundMessage {
            id: "wamid.2".to_string(),
            from: "5511".to_string(),
            timestamp: None,
            body: MessageBody::Audio { media_id: "m-1".to_string(), mime_type: None },
        };
        assert_eq!(h.handle(&audio, today()), Outcome::NeedsTranscription { media_id: "m-1".to_string() });
        assert_eq!(h.handle(&audio, today()).reply(), None);

        let sticker = InboundMessage { body: MessageBody::Other("sticker".to_string()), ..audio };
        assert_eq!(h.handle(&sticker, today()), Outcome::Ignored);
    }

    #[test]
    fn test_format_reply_investment() {
        let record = TransactionRecord::new(today(), "Banco", 1234.5, TransactionType::Investment, "cdb", Source::Whatsapp).unwrap();
        assert_eq!(
            format_reply(&record),
            "✅ Investimento registrado!\n💰 Valor: R$ 1.234,50\n📂 Categoria: Banco\n📝 cdb\n📅 20/03/2025"
        );
    }
}
