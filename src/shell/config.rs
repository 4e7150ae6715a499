// Runtime configuration, read once at startup.
//
// Responsibilities
// - Load `.env` when present and report a malformed one, then read the process environment.
// - Fail fast on a missing required variable or an unparsable value.
// - Decide the runtime mode that switches guard diagnostics and GraphiQL on.

use axum::http::HeaderValue;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::shared::infrastructure::media_store::cloudinary::CloudinaryCredentials;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
}

impl RuntimeMode {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("development") => RuntimeMode::Development,
            _ => RuntimeMode::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == RuntimeMode::Development
    }

    pub fn default_log_filter(self) -> &'static str {
        match self {
            RuntimeMode::Development => "incridea_api=debug,tower_http=debug,info",
            RuntimeMode::Production => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub frontend_origin: HeaderValue,
    pub runtime_mode: RuntimeMode,
    pub webhook_secret: String,
    pub cloudinary: Option<CloudinaryCredentials>,
    pub admin_token: Option<String>,
}

/// Loads `.env` into the process environment. A missing file is fine, a malformed one is not.
pub fn load_dotenv() -> Result<(), dotenvy::Error> {
    ignore_missing(dotenvy::dotenv())
}

fn ignore_missing(loaded: Result<PathBuf, dotenvy::Error>) -> Result<(), dotenvy::Error> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e),
    }
}

fn non_blank(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).and_then(non_blank);

        let frontend_url = read("FRONTEND_URL").ok_or(ConfigError::Missing("FRONTEND_URL"))?;
        let origin = frontend_url.trim_end_matches('/');
        let frontend_origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
            key: "FRONTEND_URL",
            reason: e.to_string(),
        })?;

        let port = match read("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("{raw:?} is not a port number"),
            })?,
            None => DEFAULT_PORT,
        };
        let host: IpAddr = read("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "HOST",
                reason: e.to_string(),
            })?;

        let webhook_secret =
            read("RAZORPAY_WEBHOOK_SECRET").ok_or(ConfigError::Missing("RAZORPAY_WEBHOOK_SECRET"))?;

        let cloudinary = match (
            read("CLOUDINARY_CLOUD_NAME"),
            read("CLOUDINARY_API_KEY"),
            read("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryCredentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            frontend_origin,
            runtime_mode: RuntimeMode::parse(read("APP_ENV").as_deref()),
            webhook_secret,
            cloudinary,
            admin_token: read("ADMIN_API_TOKEN"),
        })
    }
}
