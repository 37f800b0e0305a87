use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Value, json};
use std::fmt;

use crate::types::{LLMClient, LLMMessage, LLMMessageType};
use crate::utils::FALLBACK_MIME_TYPE;

use super::models::{GeminiResponse, InlineData};

const IMAGE_MODALITY: &str = "IMAGE";

/// Non-success HTTP status returned by the Gemini API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatusError {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gemini generateContent failed: status {} body {}",
            self.status, self.body
        )
    }
}

impl std::error::Error for ApiStatusError {}

impl ApiStatusError {
    pub fn is_bad_request(&self) -> bool {
        self.status == 400
    }
}

/// Finds the HTTP status error anywhere in an error chain.
pub fn api_status_error(err: &anyhow::Error) -> Option<&ApiStatusError> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ApiStatusError>())
}

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({ "text": text }),
            LLMMessageType::IMAGE {
                data_b64,
                mime_type,
            } => {
                let mime = mime_type
                    .filter(|value| !value.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_MIME_TYPE.into());
                json!({
                    "inlineData": {
                        "mimeType": mime,
                        "data": data_b64
                    }
                })
            }
        })
        .collect()
}
pub fn convert_messages_to_gemini_contents(messages: Vec<LLMMessage>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| {
            let parts = convert_body_parts_gemini(m.content);
            json!({
                "role": "user",
                "parts": parts
            })
        })
        .collect()
}

/// Request body asking for image-only output.
pub fn build_generate_body(messages: Vec<LLMMessage>) -> Value {
    json!({
        "contents": convert_messages_to_gemini_contents(messages),
        "generationConfig": { "responseModalities": [IMAGE_MODALITY] }
    })
}

fn log_request_summary(url: &str, messages: &[LLMMessage]) {
    for (index, message) in messages.iter().enumerate() {
        for part in &message.content {
            match part {
                LLMMessageType::TEXT(text) => {
                    tracing::debug!(
                        url,
                        message_index = index,
                        kind = part.kind(),
                        chars = text.len()
                    );
                }
                LLMMessageType::IMAGE {
                    data_b64,
                    mime_type,
                } => {
                    tracing::debug!(
                        url,
                        message_index = index,
                        kind = part.kind(),
                        mime_type = mime_type.as_deref().unwrap_or(FALLBACK_MIME_TYPE),
                        data_length = data_b64.len()
                    );
                }
            }
        }
    }
}

/// Sends one `generateContent` call. No retries.
pub async fn send_generate_request(
    api_client: &LLMClient,
    body_part: Vec<LLMMessage>,
) -> Result<GeminiResponse> {
    let endpoint = api_client.endpoint().trim_end_matches('/');
    let model = api_client.default_model();
    let model = model.strip_prefix("models/").unwrap_or(model);
    let url = format!("{}/{}:generateContent", endpoint, model);

    log_request_summary(&url, &body_part);
    let body = build_generate_body(body_part);

    let client = Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .context("HTTP request failed")?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .context("Reading response body failed")?;

    if !status.is_success() {
        return Err(anyhow::Error::new(ApiStatusError {
            status: status.as_u16(),
            body: response_text,
        }));
    }

    let response: GeminiResponse = serde_json::from_str(&response_text).with_context(|| {
        format!(
            "Failed to decode Gemini response JSON. Raw response: {}",
            response_text
        )
    })?;

    Ok(response)
}

/// First inline image of the first candidate, in part order.
pub fn first_inline_image(response: &GeminiResponse) -> Option<&InlineData> {
    response
        .candidates
        .first()?
        .content
        .parts
        .iter()
        .find_map(|part| part.inline_image())
}

pub fn response_to_text_data(response: &GeminiResponse) -> Result<String> {
    //get only 1 text response
    if let Some(candidate) = response.candidates.first() {
        let mut full_text = String::new();
        for part in &candidate.content.parts {
            if let Some(text) = &part.text {
                full_text.push_str(text);
            }
        }
        Ok(full_text)
    } else {
        Err(anyhow::anyhow!("No candidates found"))
    }
}
