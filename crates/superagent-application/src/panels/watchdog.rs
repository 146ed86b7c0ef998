//! Spending watchdog: status, notifications, switch, limit and movements.
//!
//! Both reads run together on mount and whenever the session generation or
//! the panel's [`DataVersion`] changes. Only the three mutating operations
//! bump the version.

use std::sync::Arc;

use superagent_core::freshness::{DataVersion, Dependencies, RefreshGate};
use superagent_core::watchdog::{
    MovementRequest, Notification, SetLimitRequest, WatchdogStatus, WatchdogSwitch,
};
use superagent_core::{DashboardApi, Result, SessionContext};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::messages;
use crate::notice::Notice;
use crate::read_slot::ReadSlot;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchdogView {
    pub status: WatchdogStatus,
    pub notifications: Vec<Notification>,
    pub notice: Option<Notice>,
}

pub struct WatchdogPanel {
    api: Arc<dyn DashboardApi>,
    session: SessionContext,
    view: RwLock<WatchdogView>,
    version: DataVersion,
    gate: RefreshGate,
    status_slot: ReadSlot,
    notifications_slot: ReadSlot,
}

impl WatchdogPanel {
    pub fn new(api: Arc<dyn DashboardApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            view: RwLock::new(WatchdogView::default()),
            version: DataVersion::new(),
            gate: RefreshGate::new(),
            status_slot: ReadSlot::new("watchdog status"),
            notifications_slot: ReadSlot::new("watchdog notifications"),
        }
    }

    pub async fn view(&self) -> WatchdogView {
        self.view.read().await.clone()
    }

    pub fn data_version(&self) -> u64 {
        self.version.current()
    }

    pub async fn mount(&self) {
        self.sync().await;
    }

    pub async fn sync(&self) {
        let deps = Dependencies {
            session_generation: self.session.generation(),
            data_version: self.version.current(),
        };
        if self.gate.should_refresh(deps) {
            self.refresh().await;
        }
    }

    /// Issues both reads concurrently and applies each independently.
    pub async fn refresh(&self) {
        let token = match self.session.require_token() {
            Ok(token) => token,
            Err(err) => {
                self.set_notice(Notice::from_fixed_error(&err, messages::WATCHDOG_STATUS_FAILED))
                    .await;
                return;
            }
        };

        let status_ticket = self.status_slot.begin(&self.session);
        let notifications_ticket = self.notifications_slot.begin(&self.session);
        let (status, notifications) = tokio::join!(
            self.api.watchdog_status(&token),
            self.api.watchdog_notifications(&token),
        );

        let mut view = self.view.write().await;
        if self.status_slot.accepts(&self.session, status_ticket) {
            match status {
                Ok(status) => view.status = status,
                Err(err) => {
                    warn!("[WatchdogPanel] Status read failed: {}", err);
                    view.notice = Some(Notice::from_fixed_error(&err, messages::WATCHDOG_STATUS_FAILED));
                }
            }
        }
        if self.notifications_slot.accepts(&self.session, notifications_ticket) {
            match notifications {
                Ok(notifications) => view.notifications = notifications,
                Err(err) => {
                    warn!("[WatchdogPanel] Notification read failed: {}", err);
                    view.notice = Some(Notice::from_fixed_error(
                        &err,
                        messages::WATCHDOG_NOTIFICATIONS_FAILED,
                    ));
                }
            }
        }
    }

    /// Flips the watchdog based on the last `active` flag read.
    pub async fn toggle(&self) {
        let switch = WatchdogSwitch::toggling(self.view.read().await.status.active);
        let success = match switch {
            WatchdogSwitch::Activate => messages::WATCHDOG_ACTIVATED,
            WatchdogSwitch::Deactivate => messages::WATCHDOG_DEACTIVATED,
        };
        debug!("[WatchdogPanel] Toggle -> {:?}", switch);

        let result = match self.session.require_token() {
            Ok(token) => self.api.switch_watchdog(&token, switch).await,
            Err(err) => Err(err),
        };
        self.finish_mutation(result, success, messages::WATCHDOG_SWITCH_FAILED)
            .await;
    }

    /// `limit` is the raw form text. It must parse as a number; its sign is not checked.
    pub async fn set_limit(&self, limit: &str) {
        let Some(limit) = parse_number(limit) else {
            return self.set_notice(Notice::error(messages::WATCHDOG_LIMIT_INVALID)).await;
        };

        let result = match self.session.require_token() {
            Ok(token) => {
                self.api
                    .set_watchdog_limit(&token, &SetLimitRequest { limit })
                    .await
            }
            Err(err) => Err(err),
        };
        self.finish_mutation(result, messages::WATCHDOG_LIMIT_UPDATED, messages::WATCHDOG_LIMIT_FAILED)
            .await;
    }

    /// Records a spending movement. `amount` is the raw form text.
    pub async fn add_movement(&self, amount: &str, desc: &str) {
        let Some(amount) = parse_number(amount) else {
            return self.set_notice(Notice::error(messages::WATCHDOG_AMOUNT_INVALID)).await;
        };

        let request = MovementRequest {
            amount,
            desc: desc.to_string(),
        };
        let result = match self.session.require_token() {
            Ok(token) => self.api.add_movement(&token, &request).await,
            Err(err) => Err(err),
        };
        self.finish_mutation(
            result,
            messages::WATCHDOG_MOVEMENT_ADDED,
            messages::WATCHDOG_MOVEMENT_FAILED,
        )
        .await;
    }

    async fn finish_mutation(&self, result: Result<()>, success: &str, failure: &str) {
        match result {
            Ok(()) => {
                self.set_notice(Notice::success(success)).await;
                self.version.bump();
                self.sync().await;
            }
            Err(err) => {
                warn!("[WatchdogPanel] {}: {}", failure, err);
                self.set_notice(Notice::from_fixed_error(&err, failure)).await;
            }
        }
    }

    async fn set_notice(&self, notice: Notice) {
        self.view.write().await.notice = Some(notice);
    }
}

/// Form number fields; blank, non-numeric and non-finite text is rejected.
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
