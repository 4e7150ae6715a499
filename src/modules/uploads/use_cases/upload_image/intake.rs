// Multipart intake: exactly one file part named `image`.
//
// Text parts are skipped. A file under any other field name, or a second image, fails the
// request. The file is read chunk by chunk and refused once it passes the byte limit.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use bytes::BytesMut;

use crate::modules::uploads::use_cases::upload_image::handler::{ImageFile, UploadError};

pub const IMAGE_FIELD: &str = "image";

pub async fn single_image(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<ImageFile, UploadError> {
    let mut image: Option<ImageFile> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| intake_error(e, max_bytes))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let name = field.name().unwrap_or_default().to_string();
        if name != IMAGE_FIELD {
            return Err(UploadError::UnexpectedField(name));
        }
        if image.is_some() {
            return Err(UploadError::TooManyFiles);
        }

        let content_type = field.content_type().map(str::to_string);
        let mut buffer = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| intake_error(e, max_bytes))?
        {
            if buffer.len() + chunk.len() > max_bytes {
                return Err(UploadError::TooLarge { limit: max_bytes });
            }
            buffer.extend_from_slice(&chunk);
        }

        image = Some(ImageFile {
            file_name: Some(file_name),
            content_type,
            bytes: buffer.freeze(),
        });
    }

    image.ok_or(UploadError::NoFile)
}

// The body limit layer reports overflow as 413, same as an oversized image.
fn intake_error(error: MultipartError, max_bytes: usize) -> UploadError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge { limit: max_bytes }
    } else {
        UploadError::Multipart(error.body_text())
    }
}
