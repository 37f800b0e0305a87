use llmapi::providers::gemini::models::GeminiResponse;
use llmapi::{
    api_status_error, first_inline_image, response_to_text_data, send_generate_request,
    LLMMessage, LLMMessageType,
};

use crate::commands::prompts::{build_restore_prompt, FACE_SWAP_PROMPT};
use crate::config::ServiceConfig;
use crate::constants::{DEFAULT_IMAGE_MIME, FACE_SWAP_FILE_NAME, RESTORED_FILE_NAME};
use crate::data_url::{self, ImagePayload};
use crate::error::{RestoreError, Result};
use crate::models::RestoreSettings;

/// The two request flows. They share transport and extraction but differ in
/// how failures are reported and where results are saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Restore,
    FaceSwap,
}

impl Flow {
    pub fn download_file_name(self) -> &'static str {
        match self {
            Flow::Restore => RESTORED_FILE_NAME,
            Flow::FaceSwap => FACE_SWAP_FILE_NAME,
        }
    }

    fn service_error(self, err: anyhow::Error) -> RestoreError {
        let bad_request = api_status_error(&err).is_some_and(|status| status.is_bad_request());
        match self {
            Flow::FaceSwap if bad_request => RestoreError::ContentRejected(err.into()),
            Flow::FaceSwap => RestoreError::SwapFailed(err.into()),
            Flow::Restore => RestoreError::RestoreFailed(err.into()),
        }
    }
}

/// Restores one photo and returns the generated image as a data URL.
pub async fn restore_photo(
    config: &ServiceConfig,
    image_data_url: &str,
    settings: &RestoreSettings,
) -> Result<String> {
    if image_data_url.trim().is_empty() {
        return Err(RestoreError::MissingImage);
    }
    let client = config.client()?;

    let image = data_url::decode(image_data_url);
    let prompt = build_restore_prompt(settings);
    tracing::debug!(prompt = %prompt, "built restore prompt");

    generate(Flow::Restore, &client, vec![image], prompt).await
}

/// Puts the face from `source_data_url` onto the person in `target_data_url`.
pub async fn swap_faces(
    config: &ServiceConfig,
    source_data_url: &str,
    target_data_url: &str,
) -> Result<String> {
    if source_data_url.trim().is_empty() || target_data_url.trim().is_empty() {
        return Err(RestoreError::MissingFaceSwapImages);
    }
    let client = config.client()?;

    let images = vec![
        data_url::decode(source_data_url),
        data_url::decode(target_data_url),
    ];

    generate(Flow::FaceSwap, &client, images, FACE_SWAP_PROMPT.to_string()).await
}

async fn generate(
    flow: Flow,
    client: &llmapi::LLMClient,
    images: Vec<ImagePayload>,
    prompt: String,
) -> Result<String> {
    let mut parts: Vec<LLMMessageType> = images
        .into_iter()
        .map(|image| LLMMessageType::image_b64(image.data, image.mime_type))
        .collect();
    parts.push(LLMMessageType::text(prompt));

    let response = send_generate_request(client, vec![LLMMessage::user(parts)])
        .await
        .map_err(|err| {
            tracing::error!(?flow, error = %format!("{err:#}"), "Gemini API call failed");
            flow.service_error(err)
        })?;

    let image = extract_first_image(&response).inspect_err(|err| {
        if let RestoreError::NoImageGenerated { reason } = err {
            tracing::warn!(
                ?flow,
                reason = reason.as_deref().unwrap_or("unknown"),
                reply = response_to_text_data(&response).unwrap_or_default(),
                "no image in response"
            );
        }
    })?;

    tracing::info!(
        ?flow,
        model_version = response.model_version.as_deref().unwrap_or("unknown"),
        total_tokens = ?response
            .usage_metadata
            .as_ref()
            .and_then(|usage| usage.total_token_count),
        "image generated"
    );
    Ok(image)
}

/// Data URL of the first inline image in the first candidate.
pub fn extract_first_image(response: &GeminiResponse) -> Result<String> {
    let inline = first_inline_image(response).ok_or_else(|| RestoreError::NoImageGenerated {
        reason: response.refusal_reason(),
    })?;

    let mime_type = inline.mime_type.trim();
    let mime_type = if mime_type.is_empty() {
        DEFAULT_IMAGE_MIME
    } else {
        mime_type
    };
    Ok(data_url::encode(mime_type, &inline.data))
}
