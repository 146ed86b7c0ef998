//! File-system side of the Super Agent client: paths, config file and logging.

pub mod config_service;
pub mod logging;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use logging::init_logging;
pub use paths::SuperAgentPaths;
