//! Graphic/web project creation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SuperAgentError;

/// Kind of project the backend team should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    #[default]
    Webapp,
    Sito,
    AppMobile,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 3] = [Self::Webapp, Self::Sito, Self::AppMobile];

    /// Wire value (`webapp`, `sito`, `app_mobile`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webapp => "webapp",
            Self::Sito => "sito",
            Self::AppMobile => "app_mobile",
        }
    }

    /// Human label shown next to the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Webapp => "WebApp",
            Self::Sito => "Sito Internet",
            Self::AppMobile => "App Mobile",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = SuperAgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SuperAgentError::validation(format!("unknown project kind '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateProjectRequest {
    pub nome: String,
    pub descrizione: String,
    pub tipo: ProjectKind,
}

/// The created project, echoed back with the team assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub nome: String,
    pub descrizione: String,
    pub tipo: ProjectKind,
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default)]
    pub stato: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_values() {
        let json = serde_json::to_string(&ProjectKind::AppMobile).unwrap();
        assert_eq!(json, "\"app_mobile\"");
        assert_eq!("sito".parse::<ProjectKind>().unwrap(), ProjectKind::Sito);
        assert!("desktop".parse::<ProjectKind>().is_err());
    }
}
