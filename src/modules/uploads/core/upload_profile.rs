// Upload profiles: where each upload route stores its image and what it accepts.

use thiserror::Error;

const MIB: usize = 1024 * 1024;
const EVENT_NAME_MAX_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadProfile {
    EventImage,
    EasterEgg,
    IdCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("event name is required")]
    MissingEventName,

    #[error("invalid event name: {0}")]
    InvalidEventName(String),
}

impl UploadProfile {
    pub fn name(self) -> &'static str {
        match self {
            UploadProfile::EventImage => "event_image",
            UploadProfile::EasterEgg => "easter_egg",
            UploadProfile::IdCard => "id_card",
        }
    }

    pub fn allowed_formats(self) -> &'static [&'static str] {
        match self {
            UploadProfile::EventImage => &["jpg", "jpeg", "png", "webp"],
            UploadProfile::EasterEgg => &["jpg", "jpeg", "png", "webp", "gif"],
            UploadProfile::IdCard => &["jpg", "jpeg", "png"],
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            UploadProfile::EventImage | UploadProfile::EasterEgg => 5 * MIB,
            UploadProfile::IdCard => 2 * MIB,
        }
    }

    pub fn allows(self, format: &str) -> bool {
        self.allowed_formats().contains(&format)
    }

    pub fn folder(self, event_name: Option<&str>) -> Result<String, ProfileError> {
        match self {
            UploadProfile::EventImage => {
                let name = event_name.ok_or(ProfileError::MissingEventName)?;
                Ok(format!("events/{}", validate_event_name(name)?))
            }
            UploadProfile::EasterEgg => Ok("easter-egg".to_string()),
            UploadProfile::IdCard => Ok("id".to_string()),
        }
    }
}

pub fn validate_event_name(name: &str) -> Result<&str, ProfileError> {
    let trimmed = name.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= EVENT_NAME_MAX_LEN
        && trimmed.chars().all(is_event_name_char);
    if valid {
        Ok(trimmed)
    } else {
        Err(ProfileError::InvalidEventName(name.to_string()))
    }
}

fn is_event_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-')
}

/// Lower-case image format from the content type, else from the file extension.
pub fn detect_format(content_type: Option<&str>, file_name: Option<&str>) -> Option<String> {
    let from_content_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .and_then(|ct| ct.strip_prefix("image/"))
        .map(|subtype| subtype.to_ascii_lowercase())
        .filter(|subtype| !subtype.is_empty());
    from_content_type.or_else(|| {
        file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .filter(|extension| !extension.is_empty())
    })
}
