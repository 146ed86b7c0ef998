//! Domain records, error type and capability traits shared by every Super Agent crate.

pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod console;
pub mod error;
pub mod freshness;
pub mod job;
pub mod project;
pub mod session;
pub mod system;
pub mod watchdog;

// Re-export common types
pub use api::{ConsoleApi, DashboardApi, ResourceClient};
pub use error::{Result, SuperAgentError};
pub use session::{BearerToken, SessionContext};
