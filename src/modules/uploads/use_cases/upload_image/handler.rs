use crate::modules::uploads::core::upload_profile::{ProfileError, UploadProfile, detect_format};
use crate::shared::infrastructure::media_store::{
    MediaStore, MediaStoreError, MediaUpload, StoredMedia,
};
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("No file uploaded")]
    NoFile,

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Only one image may be uploaded")]
    TooManyFiles,

    #[error("File too large, limit is {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("malformed multipart body: {0}")]
    Multipart(String),

    #[error(transparent)]
    Store(#[from] MediaStoreError),
}

/// The single image taken from a multipart body.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A resolved destination for one upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub profile: UploadProfile,
    pub folder: String,
}

pub struct UploadImageHandler {
    store: Arc<dyn MediaStore>,
}

impl UploadImageHandler {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    pub fn prepare(
        &self,
        profile: UploadProfile,
        event_name: Option<&str>,
    ) -> Result<UploadTarget, UploadError> {
        Ok(UploadTarget {
            profile,
            folder: profile.folder(event_name)?,
        })
    }

    /// Shared completion step for every upload route.
    pub async fn complete(
        &self,
        target: &UploadTarget,
        image: ImageFile,
    ) -> Result<StoredMedia, UploadError> {
        let limit = target.profile.max_bytes();
        if image.bytes.len() > limit {
            return Err(UploadError::TooLarge { limit });
        }
        let format = detect_format(image.content_type.as_deref(), image.file_name.as_deref())
            .ok_or_else(|| UploadError::UnsupportedFormat("unknown".into()))?;
        if !target.profile.allows(&format) {
            return Err(UploadError::UnsupportedFormat(format));
        }

        let stored = self
            .store
            .store(MediaUpload {
                folder: target.folder.clone(),
                file_name: image.file_name,
                content_type: image.content_type,
                bytes: image.bytes,
            })
            .await?;
        tracing::info!(
            profile = target.profile.name(),
            public_id = %stored.public_id,
            bytes = stored.bytes,
            "image uploaded"
        );
        Ok(stored)
    }
}
