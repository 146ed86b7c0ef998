//! Endpoint paths of both backends, relative to their base URL.

use superagent_core::job::JobId;
use superagent_core::watchdog::WatchdogSwitch;

pub const HEALTH: &str = "/api/health";
pub const LOGIN: &str = "/api/login";
pub const DISTRIBUTED_JOBS: &str = "/api/distributed_jobs";
pub const CHAT: &str = "/api/chat_superagent";
pub const GRAPHIC_WEB_PROJECT: &str = "/api/graphic_web_project";
pub const SCAN_APPS: &str = "/api/scan_apps";
pub const START_APP: &str = "/api/start_app";
pub const LIST_PROCESSES: &str = "/api/list_processes";
pub const KILL_APP: &str = "/api/kill_app";
pub const LOG_ACTION: &str = "/api/log_action";
pub const AUTHORIZE: &str = "/api/authorize";
pub const WATCHDOG_STATUS: &str = "/api/watchdog/status";
pub const WATCHDOG_NOTIFICATIONS: &str = "/api/watchdog/notifications";
pub const WATCHDOG_ACTIVATE: &str = "/api/watchdog/activate";
pub const WATCHDOG_DEACTIVATE: &str = "/api/watchdog/deactivate";
pub const WATCHDOG_SET_LIMIT: &str = "/api/watchdog/set_limit";
pub const WATCHDOG_ADD_MOVEMENT: &str = "/api/watchdog/add_movement";

pub const CONSOLE_STATUS: &str = "/status";
pub const CONSOLE_ANALYZE: &str = "/analyze";
pub const CONSOLE_REPORT: &str = "/report";
pub const CONSOLE_LLM_ASSIST: &str = "/llm_assist";

/// `/api/distributed_jobs/{id}`, with the id percent-encoded as one segment.
pub fn job(id: &JobId) -> String {
    format!("{}/{}", DISTRIBUTED_JOBS, urlencoding::encode(id.as_str()))
}

pub fn watchdog_switch(switch: WatchdogSwitch) -> &'static str {
    match switch {
        WatchdogSwitch::Activate => WATCHDOG_ACTIVATE,
        WatchdogSwitch::Deactivate => WATCHDOG_DEACTIVATE,
    }
}
