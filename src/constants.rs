pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

pub const API_KEY_ENV: &str = "API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ENDPOINT_ENV: &str = "GEMINI_ENDPOINT";
pub const MODEL_ENV: &str = "GEMINI_MODEL";

pub const RESTORED_FILE_NAME: &str = "restored-photo.png";
pub const FACE_SWAP_FILE_NAME: &str = "ket-qua-ghep-mat.png";

pub const MIN_RESULTS: u8 = 1;
pub const MAX_RESULTS: u8 = 5;
