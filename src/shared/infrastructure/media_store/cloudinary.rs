// Cloudinary implementation of the MediaStore port.
//
// Uploads go to the signed image upload endpoint as multipart form data. The request is
// signed with SHA-256 over the sorted signed parameters followed by the API secret.

use crate::shared::infrastructure::media_store::{
    MediaStore, MediaStoreError, MediaUpload, StoredMedia,
};
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com/v1_1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
    bytes: u64,
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    credentials: CloudinaryCredentials,
    base_url: String,
}

impl CloudinaryMediaStore {
    pub fn new(credentials: CloudinaryCredentials) -> Result<Self, MediaStoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MediaStoreError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.base_url.trim_end_matches('/'),
            self.credentials.cloud_name
        )
    }
}

/// Hex SHA-256 of `k1=v1&k2=v2...` (sorted by key) with the secret appended.
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait::async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, MediaStoreError> {
        let timestamp = Utc::now().timestamp().to_string();
        let params = [
            ("folder", upload.folder.as_str()),
            ("timestamp", timestamp.as_str()),
        ];
        let signature = sign(&params, &self.credentials.api_secret);

        let mut file = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name.unwrap_or_else(|| "upload".to_string()));
        if let Some(content_type) = upload.content_type.as_deref() {
            file = file
                .mime_str(content_type)
                .map_err(|e| MediaStoreError::Backend(e.to_string()))?;
        }
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", upload.folder)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaStoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(MediaStoreError::Provider(message));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaStoreError::Provider(e.to_string()))?;
        tracing::debug!(
            public_id = %body.public_id,
            bytes = body.bytes,
            "cloudinary upload stored"
        );
        Ok(StoredMedia {
            public_id: body.public_id,
            url: body.secure_url,
            bytes: body.bytes,
            format: body.format,
        })
    }
}
