//! Subscription handshake (`GET` with `hub.mode`, `hub.verify_token`, `hub.challenge`).

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("no verify token configured")]
    NotConfigured,

    #[error("unexpected hub.mode {0:?}")]
    WrongMode(Option<String>),

    #[error("verify token mismatch")]
    TokenMismatch,

    #[error("missing hub.challenge")]
    MissingChallenge,
}

/// Returns the challenge to echo back when the handshake is valid.
///
/// `expected_token` comes from configuration; an empty one rejects everything.
pub fn verify_subscription(query: &VerifyQuery, expected_token: &str) -> Result<String, VerifyError> {
    if expected_token.is_empty() {
        return Err(VerifyError::NotConfigured);
    }
    if query.mode.as_deref() != Some("subscribe") {
        return Err(VerifyError::WrongMode(query.mode.clone()));
    }
    if query.verify_token.as_deref() != Some(expected_token) {
        return Err(VerifyError::TokenMismatch);
    }
    match query.challenge.as_deref() {
        Some(c) if !c.is_empty() => Ok(c.to_string()),
        _ => Err(VerifyError::MissingChallenge),
    }
}
