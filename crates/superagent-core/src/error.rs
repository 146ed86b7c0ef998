//! Error types for the Super Agent client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Super Agent crate.
///
/// Client adapters return these typed variants; panels collapse them into
/// fixed user-facing strings at the call site.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SuperAgentError {
    /// The request never produced an HTTP response (connect, DNS, reset, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status code.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        /// The `msg` / `detail` / `error` field of the body, when present.
        message: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response body: {message}")]
    Decode {
        message: String,
        /// Message field found in the body despite the shape mismatch.
        server_message: Option<String>,
    },

    /// Client-side form validation failed; no request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An authenticated request was attempted without a session token.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl SuperAgentError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Status error
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    /// Creates a Decode error without a server message
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            server_message: None,
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the request failed before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a non-success status
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Returns the message the backend put in the response body, if any.
    ///
    /// Only `Status` and `Decode` errors can carry one; transport and
    /// validation failures never do.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Decode { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SuperAgentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SuperAgentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SuperAgentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SuperAgentError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SuperAgentError>`.
pub type Result<T> = std::result::Result<T, SuperAgentError>;
