use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::modules::uploads::core::upload_profile::UploadProfile;
use crate::modules::uploads::use_cases::upload_image::handler::UploadError;
use crate::modules::uploads::use_cases::upload_image::intake;
use crate::shared::infrastructure::media_store::StoredMedia;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub public_id: String,
    pub format: Option<String>,
}

impl From<StoredMedia> for UploadResponse {
    fn from(stored: StoredMedia) -> Self {
        Self {
            url: stored.url,
            public_id: stored.public_id,
            format: stored.format,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = match &self {
            UploadError::Profile(_)
            | UploadError::NoFile
            | UploadError::UnexpectedField(_)
            | UploadError::TooManyFiles
            | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadError::Store(e) => {
                tracing::error!(error = %e, "media store failed");
                StatusCode::BAD_GATEWAY
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn event_image(
    State(state): State<AppState>,
    Path(event_name): Path<String>,
    multipart: Multipart,
) -> Response {
    receive(
        &state,
        UploadProfile::EventImage,
        Some(event_name.as_str()),
        multipart,
    )
    .await
}

pub async fn easter_egg(State(state): State<AppState>, multipart: Multipart) -> Response {
    receive(&state, UploadProfile::EasterEgg, None, multipart).await
}

pub async fn id_card(State(state): State<AppState>, multipart: Multipart) -> Response {
    receive(&state, UploadProfile::IdCard, None, multipart).await
}

async fn receive(
    state: &AppState,
    profile: UploadProfile,
    event_name: Option<&str>,
    mut multipart: Multipart,
) -> Response {
    let handler = &state.upload_handler;
    let result = async {
        let target = handler.prepare(profile, event_name)?;
        let image = intake::single_image(&mut multipart, profile.max_bytes()).await?;
        handler.complete(&target, image).await
    }
    .await;

    match result {
        Ok(stored) => Json(UploadResponse::from(stored)).into_response(),
        Err(e) => e.into_response(),
    }
}
