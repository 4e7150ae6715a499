// Port for storing uploaded media with an external provider.
//
// Responsibilities
// - Describe a single-file upload into a folder and the reference the provider hands back.
//
// Testing guidance
// - Use the in memory store for handler and router tests.

pub mod cloudinary;
pub mod in_memory;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub folder: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredMedia {
    pub public_id: String,
    pub url: String,
    pub bytes: u64,
    pub format: Option<String>,
}

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("media provider rejected the upload: {0}")]
    Provider(String),

    #[error("media provider unreachable: {0}")]
    Transport(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, MediaStoreError>;
}
