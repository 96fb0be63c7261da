//! caixa-whatsapp: WhatsApp webhook plumbing around the shared classifier.
//!
//! Transport (HTTP server, outbound message API) lives outside this crate;
//! here we only verify subscriptions, decode inbound payloads and turn
//! messages into records plus a reply text.

pub mod handler;
pub mod payload;
pub mod verify;

pub use handler::{MessageHandler, Outcome, format_reply};
pub use payload::{InboundMessage, MessageBody, WebhookPayload, inbound_messages, parse_payload};
pub use verify::{VerifyError, VerifyQuery, verify_subscription};
