// src/error.rs

//! Unified error handling for the stock watcher.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Listing page could not be retrieved (transport failure or non-2xx status)
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Persisted snapshot exists but does not hold a product mapping
    #[error("Corrupt state file {}: {message}", path.display())]
    CorruptState { path: PathBuf, message: String },

    /// Webhook delivery failed
    #[error("Notify delivery error: {0}")]
    NotifyDelivery(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client error outside of a fetch or delivery
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch error for the given URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a corrupt state error for the given file.
    pub fn corrupt_state(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self::CorruptState {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a notify delivery error.
    pub fn notify_delivery(message: impl fmt::Display) -> Self {
        Self::NotifyDelivery(message.to_string())
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
