// In memory implementation of the MediaStore port.
//
// Purpose
// - Support upload handler tests and local development without provider credentials.
//
// Responsibilities
// - Keep every stored upload in process and hand back a `memory://` reference.
// - Simulate an unreachable provider when switched offline.

use crate::shared::infrastructure::media_store::{
    MediaStore, MediaStoreError, MediaUpload, StoredMedia,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryMediaStore {
    uploads: RwLock<Vec<(MediaUpload, StoredMedia)>>,
    is_offline: bool,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn uploads(&self) -> Vec<(MediaUpload, StoredMedia)> {
        self.uploads.read().await.clone()
    }
}

#[async_trait::async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, MediaStoreError> {
        if self.is_offline {
            return Err(MediaStoreError::Transport("Media store offline".into()));
        }
        let public_id = format!("{}/{}", upload.folder, Uuid::now_v7());
        let format = upload
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, extension)| extension.to_ascii_lowercase());
        let stored = StoredMedia {
            url: format!("memory://{public_id}"),
            public_id,
            bytes: upload.bytes.len() as u64,
            format,
        };
        self.uploads.write().await.push((upload, stored.clone()));
        Ok(stored)
    }
}
