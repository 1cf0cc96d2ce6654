//! Error handling for the classifieds client

use std::fmt;
use thiserror::Error;

/// Message shown when the server did not explain what went wrong.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Unified error type for the classifieds client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Access token could not be decoded
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    Api {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// 404-class response
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before anything was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Indicator whether this is a 404-class response.
    ///
    /// Paginated endpoints answer 404 once the offset runs past the end, so
    /// callers treat this as "no more results" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Api { status, .. } => *status == 404,
            Error::Http(e) => e.status().map_or(false, |s| s.as_u16() == 404),
            _ => false,
        }
    }

    /// HTTP status, when the error came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::NotFound(_) => Some(404),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short message suitable for inline display.
    ///
    /// Prefers what the server said; falls back to a generic sentence for
    /// transport failures and unexplained server errors.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Error::Validation(message) | Error::Auth(message) => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Pulls a human readable message out of an error response body.
///
/// Understands `{"message": ..}`, `{"detail": ..}`, `{"error": ..}` and
/// field-error objects such as `{"price": ["Must be positive."]}`.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["message", "detail", "error"] {
        if let Some(text) = object.get(key).and_then(|v| v.as_str()) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }

    object.values().find_map(|field| match field {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        serde_json::Value::Array(items) => items
            .iter()
            .find_map(|item| item.as_str().map(str::to_string)),
        _ => None,
    })
}
