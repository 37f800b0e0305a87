//! Conversion between `data:<mime>;base64,<payload>` strings and the
//! `(mime type, base64 payload)` pair the Gemini API works with.

use std::sync::LazyLock;

use llmapi::utils::{decode_base64_to_bytes, FALLBACK_MIME_TYPE};
use regex::Regex;

use crate::error::RestoreError;

static MIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(.*?);").expect("mime pattern is a valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn to_data_url(&self) -> String {
        encode(&self.mime_type, &self.data)
    }

    /// Raw image bytes. This is the only place the payload is checked as base64.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RestoreError> {
        decode_base64_to_bytes(&self.data)
            .map_err(|err| RestoreError::InvalidImageData(err.to_string()))
    }
}

/// Splits a data URL on its first comma. The payload is passed through as-is.
pub fn decode(data_url: &str) -> ImagePayload {
    let (header, payload) = data_url.split_once(',').unwrap_or((data_url, ""));
    let mime_type = MIME_PATTERN
        .captures(header)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(FALLBACK_MIME_TYPE);

    ImagePayload::new(mime_type, payload)
}

pub fn encode(mime_type: &str, data: &str) -> String {
    format!("data:{mime_type};base64,{data}")
}
