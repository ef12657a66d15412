//! Custom error types for fxpro
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for fxpro operations
#[derive(Error, Debug)]
pub enum FxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(String),

    /// HTTP and remote API errors
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing or expired login session
    #[error("Session error: {0}")]
    Session(String),
}

impl FxError {
    /// Create a "not found" error for currencies
    pub fn currency_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Currency",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for users
    pub fn user_exists(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Message suitable for a toast, without the category prefix for errors
    /// caused by user input
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Auth(msg) | Self::Session(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for FxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for FxError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<reqwest::Error> for FxError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for fxpro operations
pub type FxResult<T> = Result<T, FxError>;
