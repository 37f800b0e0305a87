mod api;
pub mod models;
pub use api::{
    ApiStatusError, api_status_error, build_generate_body, convert_body_parts_gemini,
    convert_messages_to_gemini_contents, first_inline_image, response_to_text_data,
    send_generate_request,
};
