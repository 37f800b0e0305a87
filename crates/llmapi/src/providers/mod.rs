pub mod gemini;

pub use gemini::{
    ApiStatusError, api_status_error, convert_body_parts_gemini, first_inline_image,
    response_to_text_data, send_generate_request,
};
