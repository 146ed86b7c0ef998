//! Dashboard panels. Each owns its view state and reads on mount or on demand.

pub mod chat;
pub mod jobs;
pub mod project;
pub mod system;
pub mod watchdog;

pub use chat::ChatPanel;
pub use jobs::JobsPanel;
pub use project::ProjectPanel;
pub use system::SystemPanel;
pub use watchdog::WatchdogPanel;
