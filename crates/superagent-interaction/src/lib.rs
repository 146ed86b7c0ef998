//! HTTP adapters for the Super Agent backends.

pub mod console_client;
pub mod dashboard_client;
pub mod routes;
pub mod transport;

pub use console_client::ConsoleClient;
pub use dashboard_client::DashboardClient;
