use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_DASHBOARD_URL: &str = "http://localhost:5000";
pub const DEFAULT_CONSOLE_URL: &str = "http://localhost:8000";

/// Root of `config.toml`. Every section is optional.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(deserialize_with = "dashboard_section")]
    pub dashboard: EndpointConfig,
    #[serde(deserialize_with = "console_section")]
    pub console: EndpointConfig,
    pub logging: LoggingSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dashboard: EndpointConfig::dashboard(),
            console: EndpointConfig::console(),
            logging: LoggingSettings::default(),
        }
    }
}

/// One backend the client talks to.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub base_url: String,
    /// Per-request timeout. `None` keeps the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl EndpointConfig {
    pub fn dashboard() -> Self {
        Self {
            base_url: DEFAULT_DASHBOARD_URL.to_string(),
            timeout_secs: None,
        }
    }

    pub fn console() -> Self {
        Self {
            base_url: DEFAULT_CONSOLE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// An endpoint section as written in the file; a missing `base_url` takes
/// the default of the section it appears in.
#[derive(Deserialize)]
struct EndpointSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl EndpointSection {
    fn resolve(self, default_url: &str) -> EndpointConfig {
        EndpointConfig {
            base_url: self.base_url.unwrap_or_else(|| default_url.to_string()),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn dashboard_section<'de, D: Deserializer<'de>>(d: D) -> Result<EndpointConfig, D::Error> {
    EndpointSection::deserialize(d).map(|section| section.resolve(DEFAULT_DASHBOARD_URL))
}

fn console_section<'de, D: Deserializer<'de>>(d: D) -> Result<EndpointConfig, D::Error> {
    EndpointSection::deserialize(d).map(|section| section.resolve(DEFAULT_CONSOLE_URL))
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `superagent_interaction=debug`.
    pub level: String,
    /// Write logs to a daily file instead of stderr.
    pub file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}
