#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE {
        data_b64: String,
        mime_type: Option<String>,
    },
}
impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }
    pub fn image_b64(data_b64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: data_b64.into(),
            mime_type: Some(mime_type.into()),
        }
    }
    pub fn kind(&self) -> &'static str {
        match self {
            LLMMessageType::TEXT(_) => "text",
            LLMMessageType::IMAGE { .. } => "image",
        }
    }
}

/// One user turn sent to the model.
#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub content: Vec<LLMMessageType>,
}

impl LLMMessage {
    pub fn user(content: Vec<LLMMessageType>) -> Self {
        Self { content }
    }
}

#[derive(Clone, Debug)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}
