//! Application and process management records.

use serde::{Deserialize, Serialize};

/// `GET /api/scan_apps` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppList {
    /// Operating system label reported by the scanner.
    #[serde(default)]
    pub system: Option<String>,
    pub apps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartAppRequest {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    /// The OS may not expose a name for every process.
    #[serde(default)]
    pub name: Option<String>,
}

impl ProcessInfo {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessList {
    pub processes: Vec<ProcessInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KillAppRequest {
    pub pid: u32,
}

/// Allow/deny rule for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationRule {
    pub app: String,
    pub allow: bool,
}

/// Free-form audit entry sent to `/api/log_action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub action: String,
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_without_name() {
        let list: ProcessList =
            serde_json::from_str(r#"{"processes": [{"pid": 4, "name": null}, {"pid": 9, "name": "init"}]}"#)
                .unwrap();
        assert_eq!(list.processes[0].display_name(), "?");
        assert_eq!(list.processes[1].display_name(), "init");
    }
}
