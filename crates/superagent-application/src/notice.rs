//! The one-line message a panel shows next to the form that produced it.

use superagent_core::SuperAgentError;

use crate::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Success,
}

/// Persists until the next attempt overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    /// Collapses a failed write.
    ///
    /// Server message when the body had one, `connection` for transport
    /// failures, `fallback` otherwise. Validation errors carry their own text.
    pub fn from_write_error(err: &SuperAgentError, fallback: &str, connection: &str) -> Self {
        let text = match err {
            SuperAgentError::Transport(_) => connection.to_string(),
            SuperAgentError::Validation(text) => text.clone(),
            SuperAgentError::Unauthenticated => messages::SESSION_MISSING.to_string(),
            other => other.server_message().unwrap_or(fallback).to_string(),
        };
        Self::error(text)
    }

    /// Collapses a failed read or action into its fixed string.
    pub fn from_fixed_error(err: &SuperAgentError, fixed: &str) -> Self {
        match err {
            SuperAgentError::Unauthenticated => Self::error(messages::SESSION_MISSING),
            _ => Self::error(fixed),
        }
    }
}
