use llmapi::LLMClient;

use crate::constants::{
    API_KEY_ENV, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL, ENDPOINT_ENV, GEMINI_API_KEY_ENV,
    MODEL_ENV,
};
use crate::error::{RestoreError, Result};

/// Where and how to reach the generation service.
#[derive(Clone)]
pub struct ServiceConfig {
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Reads `API_KEY` (or `GEMINI_API_KEY`), `GEMINI_ENDPOINT` and
    /// `GEMINI_MODEL`, loading `.env` first when one exists.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_key = [API_KEY_ENV, GEMINI_API_KEY_ENV]
            .iter()
            .find_map(|var| non_blank(std::env::var(var).ok()));

        Self {
            api_key,
            endpoint: non_blank(std::env::var(ENDPOINT_ENV).ok())
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            model: non_blank(std::env::var(MODEL_ENV).ok())
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = non_blank(Some(api_key.into()));
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        if let Some(endpoint) = non_blank(Some(endpoint.into())) {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        if let Some(model) = non_blank(Some(model.into())) {
            self.model = model;
        }
        self
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(RestoreError::MissingApiKey)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Fails with [`RestoreError::MissingApiKey`] before anything else is built.
    pub fn client(&self) -> Result<LLMClient> {
        let api_key = self.api_key()?;
        Ok(LLMClient::new(api_key, &self.endpoint, &self.model))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
