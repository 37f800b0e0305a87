//! Errors surfaced to the user by the restore and face-swap flows.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// No photo was supplied to the restore flow.
    #[error("Please upload an image first.")]
    MissingImage,

    /// One or both face-swap photos are missing.
    #[error("Please upload both the source (face) image and the target (body) image.")]
    MissingFaceSwapImages,

    #[error("API_KEY environment variable not set.")]
    MissingApiKey,

    /// The restore call failed in transport or returned an error status.
    #[error("Failed to restore photo. Please check the logs for more details.")]
    RestoreFailed(#[source] BoxError),

    /// The face-swap call failed in transport or returned an error status.
    #[error("Failed to swap faces. Please check the logs for more details.")]
    SwapFailed(#[source] BoxError),

    /// The face-swap request was rejected as malformed, which in practice means
    /// the safety filter refused the photos.
    #[error(
        "The request was rejected, most likely by the content safety policy. \
         Try different photos with clearly visible faces."
    )]
    ContentRejected(#[source] BoxError),

    /// The call succeeded but no image part came back.
    #[error("No image was generated. The model may have refused the request.")]
    NoImageGenerated {
        /// Block or finish reason reported by the service, if any.
        reason: Option<String>,
    },

    #[error("invalid image data: {0}")]
    InvalidImageData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RestoreError {
    /// True for errors raised before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            RestoreError::MissingImage
                | RestoreError::MissingFaceSwapImages
                | RestoreError::MissingApiKey
        )
    }
}

pub type Result<T> = std::result::Result<T, RestoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            RestoreError::MissingApiKey.to_string(),
            "API_KEY environment variable not set."
        );
        let refused = RestoreError::NoImageGenerated {
            reason: Some("IMAGE_SAFETY".into()),
        };
        assert!(refused.to_string().contains("may have refused"));
    }

    #[test]
    fn service_failures_keep_their_cause() {
        let err = RestoreError::RestoreFailed(anyhow::anyhow!("connection reset").into());
        assert_eq!(
            err.source().map(|cause| cause.to_string()).as_deref(),
            Some("connection reset")
        );
        assert!(!err.is_precondition());
        assert!(RestoreError::MissingImage.is_precondition());
    }
}
