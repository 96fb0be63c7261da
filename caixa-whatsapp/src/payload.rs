//! Inbound webhook payload (Cloud API shape):
//!
//! ```json
//! {"object":"whatsapp_business_account","entry":[{"id":"…","changes":[{"field":"messages",
//!   "value":{"messages":[{"from":"5511…","id":"wamid…","timestamp":"1741000000",
//!   "type":"text","text":{"body":"gastei 50 no mercado"}}]}}]}]}
//! ```
//!
//! Status callbacks (`value.statuses`) carry no messages and decode to nothing.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub from: String,
    #[serde(default)]
    pub id: String,
    pub timestamp: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<TextBody>,
    pub audio: Option<MediaRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaRef {
    pub id: String,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    /// Voice note; needs an external transcription before classification
    Audio { media_id: String, mime_type: Option<String> },
    /// Anything else (image, sticker, location…), by type name
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: String,
    pub from: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub body: MessageBody,
}

pub fn parse_payload(json: &str) -> Result<WebhookPayload> {
    serde_json::from_str(json).context("decoding webhook payload")
}

/// Flatten every message of every entry/change, in payload order.
pub fn inbound_messages(payload: &WebhookPayload) -> Vec<InboundMessage> {
    payload
        .entry
        .iter()
        .flat_map(|e| e.changes.iter())
        .flat_map(|c| c.value.messages.iter())
        .map(to_inbound)
        .collect()
}

fn to_inbound(raw: &RawMessage) -> InboundMessage {
    let body = match (raw.kind.as_str(), &raw.text, &raw.audio) {
        ("text", Some(t), _) => MessageBody::Text(t.body.clone()),
        ("audio", _, Some(a)) => MessageBody::Audio {
            media_id: a.id.clone(),
            mime_type: a.mime_type.clone(),
        },
        (other, _, _) => MessageBody::Other(other.to_string()),
    };

    let timestamp = raw
        .timestamp
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    InboundMessage {
        id: raw.id.clone(),
        from: raw.from.clone(),
        timestamp,
        body,
    }
}
