use std::path::{Path, PathBuf};

use llmapi::utils::{detect_mime_type, encode_byte_to_base64};
use tokio::fs;
use tokio::fs::try_exists;

use crate::data_url;
use crate::error::Result;

/// Reads an image file into a data URL, guessing the mime type from the
/// file extension.
pub async fn read_image_as_data_url(path: &Path) -> Result<String> {
    let bytes = fs::read(path).await?;
    let mime_type = detect_mime_type(path);
    tracing::debug!(path = %path.display(), %mime_type, size = bytes.len(), "loaded image");
    Ok(data_url::encode(&mime_type, &encode_byte_to_base64(bytes)))
}

pub async fn ensure_unique_file_name(dir: &Path, original: &str) -> Result<String> {
    if !try_exists(dir.join(original)).await? {
        return Ok(original.to_string());
    }

    let original_path = Path::new(original);
    let stem = original_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");
    let extension = original_path.extension().and_then(|ext| ext.to_str());

    let mut counter = 1;
    loop {
        let candidate = match extension {
            Some(ext) => format!("{stem}-{counter}.{ext}"),
            None => format!("{stem}-{counter}"),
        };

        if !try_exists(dir.join(&candidate)).await? {
            return Ok(candidate);
        }

        counter += 1;
    }
}

/// Decodes `data_url` and writes it to `dir/file_name`, adding a numeric
/// suffix instead of overwriting an existing file.
pub async fn save_data_url(dir: &Path, file_name: &str, data_url: &str) -> Result<PathBuf> {
    // Decode before touching the disk so a bad payload leaves nothing behind.
    let bytes = data_url::decode(data_url).to_bytes()?;

    fs::create_dir_all(dir).await?;
    let unique_name = ensure_unique_file_name(dir, file_name).await?;
    let target_path = dir.join(unique_name);

    fs::write(&target_path, &bytes).await?;
    tracing::info!(path = %target_path.display(), size = bytes.len(), "saved image");
    Ok(target_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestoreError;

    #[tokio::test]
    async fn reads_file_into_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grandpa.jpg");
        std::fs::write(&path, b"hi").unwrap();

        let url = read_image_as_data_url(&path).await.unwrap();
        assert_eq!(url, "data:image/jpeg;base64,aGk=");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_image_as_data_url(&dir.path().join("nope.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, RestoreError::Io(_)));
    }

    #[tokio::test]
    async fn saving_twice_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let url = "data:image/png;base64,aGk=";

        let first = save_data_url(dir.path(), "restored-photo.png", url).await.unwrap();
        let second = save_data_url(dir.path(), "restored-photo.png", url).await.unwrap();

        assert_eq!(first.file_name().unwrap(), "restored-photo.png");
        assert_eq!(second.file_name().unwrap(), "restored-photo-1.png");
        assert_eq!(std::fs::read(second).unwrap(), b"hi");
    }

    #[tokio::test]
    async fn malformed_payload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let err = save_data_url(&out, "x.png", "data:image/png;base64,%%%")
            .await
            .unwrap_err();

        assert!(matches!(err, RestoreError::InvalidImageData(_)));
        assert!(!out.exists());
    }
}
