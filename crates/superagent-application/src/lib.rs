//! Application layer for the Super Agent client.
//!
//! Panel controllers own their view state, talk to the backends through the
//! traits in `superagent-core` and expose snapshots for rendering. Every
//! request failure ends at the panel as a [`notice::Notice`].

pub mod auth_gate;
pub mod console_shell;
pub mod messages;
pub mod notice;
pub mod panels;
pub mod read_slot;
pub mod shell;

#[cfg(test)]
mod test_support;

pub use auth_gate::AuthGate;
pub use console_shell::ConsoleShell;
pub use notice::{Notice, NoticeLevel};
pub use shell::{ActivePanel, NavigationShell, Page};
