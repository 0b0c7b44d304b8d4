//! Data models and structures
//!
//! Defines the service configuration and the JSON shapes exchanged with the
//! frontend over HTTP.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const MISSING_API_KEY: &str = "GEMINI_API_KEY or GOOGLE_API_KEY environment variable not set.";

/// Body of `POST /generate-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Success body of the generate and edit endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub image: String,
    pub text: String,
}

/// Success body of `POST /analyze-image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Error body, shaped like the `{"detail": ...}` payload the frontend reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when neither credential variable holds a usable value.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// when one exists.
    ///
    /// A missing credential is not an error here: it surfaces per request as
    /// [`crate::Error::Configuration`].
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let gemini_api_key = ["GEMINI_API_KEY", "GOOGLE_API_KEY"]
            .iter()
            .filter_map(|key| lookup(*key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| crate::Error::Configuration(format!("Invalid PORT '{}'", raw)))?,
            None => defaults.port,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                crate::Error::Configuration(format!("Invalid MAX_UPLOAD_BYTES '{}'", raw))
            })?,
            None => defaults.max_upload_bytes,
        };

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => {
                let origins = parse_origins(&raw);
                origins.iter().try_for_each(|origin| validate_origin(origin))?;
                origins
            }
            None => defaults.cors_allowed_origins,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: lookup("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            cors_allowed_origins,
            max_upload_bytes,
        })
    }

    /// Returns the credential or the configuration failure reported to callers.
    pub fn require_api_key(&self) -> crate::Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| crate::Error::Configuration(MISSING_API_KEY.to_string()))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts `*` or a bare `scheme://host[:port]` origin, the only shapes the
/// CORS middleware can match against an `Origin` header.
fn validate_origin(origin: &str) -> crate::Result<()> {
    if origin == "*" {
        return Ok(());
    }

    let invalid = || crate::Error::Configuration(format!("Invalid CORS origin '{}'", origin));
    let uri = origin.parse::<actix_web::http::Uri>().map_err(|_| invalid())?;
    let bare = uri.scheme().is_some()
        && uri.host().is_some()
        && uri.path() == "/"
        && uri.query().is_none()
        && !origin.ends_with('/');
    if bare {
        Ok(())
    } else {
        Err(invalid())
    }
}
