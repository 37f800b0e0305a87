mod commands;
mod config;
mod constants;
pub mod data_url;
mod error;
mod fs_utils;
mod models;

pub use commands::generate::{extract_first_image, restore_photo, swap_faces, Flow};
pub use commands::prompts::{build_restore_prompt, FACE_SWAP_PROMPT};

pub use config::ServiceConfig;

pub use constants::{
    API_KEY_ENV, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MIME, DEFAULT_IMAGE_MODEL,
    FACE_SWAP_FILE_NAME, MAX_RESULTS, MIN_RESULTS, RESTORED_FILE_NAME,
};

pub use data_url::ImagePayload;
pub use error::{RestoreError, Result};
pub use fs_utils::{ensure_unique_file_name, read_image_as_data_url, save_data_url};

pub use models::{Age, Gender, Preset, RestoreSettings, Smile};
