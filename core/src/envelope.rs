//! Wire envelopes wrapped around every payload.
//!
//! Success bodies look like `{ "data": ... }`; mutation failures may carry
//! `{ "messages": ["...", ...] }`. Both are decoded against explicit schemas
//! so a `data` of the wrong shape is an error instead of an unchecked value.

use serde::Deserialize;

/// `{ "data": T }`. Absent and `null` both decode to `None`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// Error body returned by the server on failed mutations. Extra keys such as
/// `status`, `error` and `path` are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub messages: Option<Vec<String>>,
}

impl ErrorEnvelope {
    /// Parse an error body leniently: anything that is not a JSON object with
    /// a `messages` array yields an empty envelope.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// The messages joined with `", "`, if there is at least one.
    pub fn summary(&self) -> Option<String> {
        match self.messages.as_deref() {
            Some(messages) if !messages.is_empty() => Some(messages.join(", ")),
            _ => None,
        }
    }
}
