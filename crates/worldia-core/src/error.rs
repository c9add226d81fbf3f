//! Error types for the WORLD.IA core.
//!
//! A single error enum covers every fallible operation outside the catalog
//! query path (which recovers from bad input locally). The server maps each
//! variant onto an HTTP status via [`WorldiaError::status_code`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the WORLD.IA core.
#[derive(Debug, Error)]
pub enum WorldiaError {
    // Request validation
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    // Accounts
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Storage
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Network / upstream AI provider
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Upstream error from {service}: {message}")]
    Upstream { service: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for WORLD.IA operations.
pub type Result<T> = std::result::Result<T, WorldiaError>;

impl From<std::io::Error> for WorldiaError {
    fn from(err: std::io::Error) -> Self {
        WorldiaError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for WorldiaError {
    fn from(err: serde_json::Error) -> Self {
        WorldiaError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for WorldiaError {
    fn from(err: rusqlite::Error) -> Self {
        WorldiaError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for WorldiaError {
    fn from(err: reqwest::Error) -> Self {
        WorldiaError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl WorldiaError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WorldiaError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        WorldiaError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// HTTP status code for this error.
    ///
    /// - 400: validation
    /// - 401: missing session or bad credentials
    /// - 404: unknown entity
    /// - 409: duplicate registration
    /// - 502: network/upstream provider failure
    /// - 500: everything else
    pub fn status_code(&self) -> u16 {
        match self {
            WorldiaError::Validation { .. } => 400,
            WorldiaError::Unauthorized | WorldiaError::InvalidCredentials => 401,
            WorldiaError::NotFound { .. } => 404,
            WorldiaError::EmailTaken => 409,
            WorldiaError::Network { .. } | WorldiaError::Upstream { .. } => 502,
            _ => 500,
        }
    }
}
