//! Request and response shapes of the console backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SuperAgentError;

/// `GET /status` body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub status: Option<String>,
}

/// Analysis flavours accepted by `/analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzeMode {
    #[default]
    Analizza,
    Security,
}

impl AnalyzeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analizza => "analizza",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for AnalyzeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzeMode {
    type Err = SuperAgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analizza" => Ok(Self::Analizza),
            "security" => Ok(Self::Security),
            other => Err(SuperAgentError::validation(format!(
                "mode must be 'analizza' or 'security', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub path: String,
    pub mode: AnalyzeMode,
}

/// Result of a Super Agent CLI run (`/analyze` and `/report`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CommandOutput {
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmAssistRequest {
    pub path: String,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LlmAssistReply {
    #[serde(default)]
    pub output: Option<String>,
}
