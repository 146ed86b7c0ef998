//! Application scan/start, process list/kill and authorization rules.

use std::sync::Arc;

use superagent_core::system::{
    ActionRecord, AuthorizationRule, KillAppRequest, ProcessInfo, StartAppRequest,
};
use superagent_core::{DashboardApi, SessionContext, SuperAgentError};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::messages;
use crate::notice::Notice;
use crate::read_slot::ReadSlot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemView {
    pub system: Option<String>,
    pub apps: Vec<String>,
    pub selected_app: Option<String>,
    pub processes: Vec<ProcessInfo>,
    /// Append-only, never sent anywhere.
    pub log: Vec<String>,
    pub notice: Option<Notice>,
}

pub struct SystemPanel {
    api: Arc<dyn DashboardApi>,
    session: SessionContext,
    view: RwLock<SystemView>,
    apps_slot: ReadSlot,
    processes_slot: ReadSlot,
}

impl SystemPanel {
    pub fn new(api: Arc<dyn DashboardApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            view: RwLock::new(SystemView::default()),
            apps_slot: ReadSlot::new("app scan"),
            processes_slot: ReadSlot::new("process list"),
        }
    }

    pub async fn view(&self) -> SystemView {
        self.view.read().await.clone()
    }

    pub async fn scan_apps(&self) {
        self.view.write().await.notice = None;
        let token = match self.session.require_token() {
            Ok(token) => token,
            Err(err) => return self.fail(&err, messages::SCAN_FAILED).await,
        };

        let ticket = self.apps_slot.begin(&self.session);
        let result = self.api.scan_apps(&token).await;

        let mut view = self.view.write().await;
        if !self.apps_slot.accepts(&self.session, ticket) {
            return;
        }
        match result {
            Ok(list) => {
                debug!("[SystemPanel] Scanned {} apps", list.apps.len());
                view.system = list.system;
                view.apps = list.apps;
            }
            Err(err) => {
                warn!("[SystemPanel] App scan failed: {}", err);
                view.notice = Some(Notice::from_fixed_error(&err, messages::SCAN_FAILED));
            }
        }
    }

    pub async fn select_app(&self, app: impl Into<String>) {
        self.view.write().await.selected_app = Some(app.into());
    }

    /// Starts the selected app. Without a selection nothing is sent.
    pub async fn start_app(&self) {
        self.view.write().await.notice = None;
        let selected = self.view.read().await.selected_app.clone();
        let Some(path) = selected else {
            return self
                .fail(&SuperAgentError::validation(messages::APP_REQUIRED), messages::APP_REQUIRED)
                .await;
        };

        let request = StartAppRequest { path: path.clone() };
        let result = match self.session.require_token() {
            Ok(token) => self.api.start_app(&token, &request).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => self.append_log(format!("Avviata: {}", path)).await,
            Err(err) => {
                warn!("[SystemPanel] Start of {} failed: {}", path, err);
                self.fail(&err, messages::START_FAILED).await;
            }
        }
    }

    pub async fn list_processes(&self) {
        self.view.write().await.notice = None;
        let token = match self.session.require_token() {
            Ok(token) => token,
            Err(err) => return self.fail(&err, messages::PROCESSES_FAILED).await,
        };

        let ticket = self.processes_slot.begin(&self.session);
        let result = self.api.list_processes(&token).await;

        let mut view = self.view.write().await;
        if !self.processes_slot.accepts(&self.session, ticket) {
            return;
        }
        match result {
            Ok(list) => view.processes = list.processes,
            Err(err) => {
                warn!("[SystemPanel] Process list failed: {}", err);
                view.notice = Some(Notice::from_fixed_error(&err, messages::PROCESSES_FAILED));
            }
        }
    }

    /// Kills `pid`, then reloads the process list.
    pub async fn kill_process(&self, pid: u32) {
        self.view.write().await.notice = None;
        let result = match self.session.require_token() {
            Ok(token) => self.api.kill_app(&token, &KillAppRequest { pid }).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.append_log(format!("Terminato PID: {}", pid)).await;
                self.list_processes().await;
            }
            Err(err) => {
                warn!("[SystemPanel] Kill of {} failed: {}", pid, err);
                self.fail(&err, messages::KILL_FAILED).await;
            }
        }
    }

    pub async fn authorize(&self, app: &str, allow: bool) {
        self.view.write().await.notice = None;
        if app.is_empty() {
            return self
                .fail(&SuperAgentError::validation(messages::APP_REQUIRED), messages::APP_REQUIRED)
                .await;
        }

        let rule = AuthorizationRule {
            app: app.to_string(),
            allow,
        };
        let result = match self.session.require_token() {
            Ok(token) => self.api.authorize(&token, &rule).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => self.append_log(format!("Autorizzazione: {} -> {}", app, allow)).await,
            Err(err) => {
                warn!("[SystemPanel] Authorization of {} failed: {}", app, err);
                self.fail(&err, messages::AUTHORIZE_FAILED).await;
            }
        }
    }

    /// Reports an action to the backend audit log.
    ///
    /// Fire-and-forget: the view is never touched, failures are only logged.
    pub async fn record_action(&self, action: &str, result: &str) {
        let Ok(token) = self.session.require_token() else {
            warn!("[SystemPanel] Not recording '{}': no session", action);
            return;
        };
        let record = ActionRecord {
            action: action.to_string(),
            result: result.to_string(),
        };
        if let Err(err) = self.api.log_action(&token, &record).await {
            warn!("[SystemPanel] Recording '{}' failed: {}", action, err);
        }
    }

    async fn append_log(&self, line: String) {
        debug!("[SystemPanel] {}", line);
        self.view.write().await.log.push(line);
    }

    async fn fail(&self, err: &SuperAgentError, fixed: &str) {
        self.view.write().await.notice = Some(Notice::from_fixed_error(err, fixed));
    }
}
