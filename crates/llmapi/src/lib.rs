pub mod providers;
pub mod types;
pub mod utils;

pub use providers::{
    ApiStatusError, api_status_error, first_inline_image, response_to_text_data,
    send_generate_request,
};
pub use types::{LLMClient, LLMMessage, LLMMessageType};
