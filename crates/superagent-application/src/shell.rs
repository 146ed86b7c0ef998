//! Navigation shell shown once the session is authenticated.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use superagent_core::{DashboardApi, Result, SessionContext, SuperAgentError};
use tokio::sync::RwLock;
use tracing::info;

use crate::panels::{ChatPanel, JobsPanel, ProjectPanel, SystemPanel, WatchdogPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Jobs,
    GraphicWeb,
    SystemAgent,
    Chat,
    Watchdog,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Self::Dashboard,
        Self::Jobs,
        Self::GraphicWeb,
        Self::SystemAgent,
        Self::Chat,
        Self::Watchdog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Jobs => "jobs",
            Self::GraphicWeb => "graphicweb",
            Self::SystemAgent => "systemagent",
            Self::Chat => "chat",
            Self::Watchdog => "watchdog",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Jobs => "Job Distribuiti",
            Self::GraphicWeb => "Progetto Grafico/Web",
            Self::SystemAgent => "Gestione Sistema",
            Self::Chat => "Chat Super Agent",
            Self::Watchdog => "Watchdog Spesa",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = SuperAgentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| SuperAgentError::validation(format!("unknown page: {s}")))
    }
}

/// The panel mounted for the current page.
#[derive(Clone)]
pub enum ActivePanel {
    Home,
    Jobs(Arc<JobsPanel>),
    Project(Arc<ProjectPanel>),
    System(Arc<SystemPanel>),
    Chat(Arc<ChatPanel>),
    Watchdog(Arc<WatchdogPanel>),
}

impl ActivePanel {
    pub fn page(&self) -> Page {
        match self {
            Self::Home => Page::Dashboard,
            Self::Jobs(_) => Page::Jobs,
            Self::Project(_) => Page::GraphicWeb,
            Self::System(_) => Page::SystemAgent,
            Self::Chat(_) => Page::Chat,
            Self::Watchdog(_) => Page::Watchdog,
        }
    }
}

/// Owns the current page and the single logout path.
///
/// Leaving a page drops its panel, so coming back starts from a fresh view.
pub struct NavigationShell {
    api: Arc<dyn DashboardApi>,
    session: SessionContext,
    active: RwLock<ActivePanel>,
}

impl NavigationShell {
    pub fn new(api: Arc<dyn DashboardApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            active: RwLock::new(ActivePanel::Home),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn current_page(&self) -> Page {
        self.active.read().await.page()
    }

    pub async fn active(&self) -> ActivePanel {
        self.active.read().await.clone()
    }

    /// Switches to `page`, mounting a new panel unless it is already shown.
    pub async fn navigate(&self, page: Page) -> Result<ActivePanel> {
        if !self.session.is_authenticated() {
            return Err(SuperAgentError::Unauthenticated);
        }
        {
            let active = self.active.read().await;
            if active.page() == page {
                return Ok(active.clone());
            }
        }

        let panel = self.build(page);
        match &panel {
            ActivePanel::Jobs(jobs) => jobs.mount().await,
            ActivePanel::Watchdog(watchdog) => watchdog.mount().await,
            _ => {}
        }

        *self.active.write().await = panel.clone();
        Ok(panel)
    }

    /// Ends the session and drops the mounted panel.
    pub async fn logout(&self) {
        self.session.invalidate();
        *self.active.write().await = ActivePanel::Home;
        info!("[NavigationShell] Logged out");
    }

    fn build(&self, page: Page) -> ActivePanel {
        let api = self.api.clone();
        let session = self.session.clone();
        match page {
            Page::Dashboard => ActivePanel::Home,
            Page::Jobs => ActivePanel::Jobs(Arc::new(JobsPanel::new(api, session))),
            Page::GraphicWeb => ActivePanel::Project(Arc::new(ProjectPanel::new(api, session))),
            Page::SystemAgent => ActivePanel::System(Arc::new(SystemPanel::new(api, session))),
            Page::Chat => ActivePanel::Chat(Arc::new(ChatPanel::new(api, session))),
            Page::Watchdog => ActivePanel::Watchdog(Arc::new(WatchdogPanel::new(api, session))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeBackend, authenticated_session};
    use serde_json::json;
    use superagent_core::chat::ChatRole;

    #[tokio::test]
    async fn test_navigation_requires_session() {
        let shell = NavigationShell::new(FakeBackend::new(), SessionContext::new());

        let err = shell.navigate(Page::Jobs).await.err();

        assert_eq!(err, Some(SuperAgentError::Unauthenticated));
        assert_eq!(shell.current_page().await, Page::Dashboard);
    }

    #[tokio::test]
    async fn test_jobs_page_mounts_with_a_read() {
        let api = FakeBackend::new();
        api.reply("list_jobs", json!([]));
        let shell = NavigationShell::new(api.clone(), authenticated_session());

        shell.navigate(Page::Jobs).await.unwrap();
        shell.navigate(Page::Jobs).await.unwrap();

        assert_eq!(api.count("list_jobs"), 1);
        assert_eq!(shell.current_page().await, Page::Jobs);
    }

    #[tokio::test]
    async fn test_leaving_a_page_resets_its_state() {
        let api = FakeBackend::new();
        api.reply("chat:ciao", json!({"response": "salve"}));
        let shell = NavigationShell::new(api, authenticated_session());

        let ActivePanel::Chat(chat) = shell.navigate(Page::Chat).await.unwrap() else {
            panic!("expected chat panel");
        };
        chat.send("ciao").await;
        assert_eq!(chat.view().await.transcript.entries()[1], (ChatRole::Agent, "salve"));

        shell.navigate(Page::Dashboard).await.unwrap();
        let ActivePanel::Chat(chat) = shell.navigate(Page::Chat).await.unwrap() else {
            panic!("expected chat panel");
        };
        assert!(chat.view().await.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let session = authenticated_session();
        let shell = NavigationShell::new(FakeBackend::new(), session.clone());
        shell.navigate(Page::GraphicWeb).await.unwrap();

        shell.logout().await;

        assert!(!session.is_authenticated());
        assert_eq!(shell.current_page().await, Page::Dashboard);
        assert!(shell.navigate(Page::GraphicWeb).await.is_err());
    }

    #[test]
    fn test_page_names_round_trip() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
        assert!("settings".parse::<Page>().is_err());
    }
}
