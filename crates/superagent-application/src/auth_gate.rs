//! Login form in front of the navigation shell.

use std::sync::Arc;

use superagent_core::auth::LoginRequest;
use superagent_core::{DashboardApi, SessionContext, SuperAgentError};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::messages;
use crate::notice::Notice;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthView {
    pub notice: Option<Notice>,
}

/// Exchanges credentials for a bearer token and stores it in the session.
pub struct AuthGate {
    api: Arc<dyn DashboardApi>,
    session: SessionContext,
    view: RwLock<AuthView>,
}

impl AuthGate {
    pub fn new(api: Arc<dyn DashboardApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            view: RwLock::new(AuthView::default()),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn view(&self) -> AuthView {
        self.view.read().await.clone()
    }

    /// Returns `true` once the session holds a token.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        self.view.write().await.notice = None;

        if username.is_empty() || password.is_empty() {
            self.view.write().await.notice = Some(Notice::error(messages::LOGIN_FIELDS_REQUIRED));
            return false;
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&request).await.and_then(|reply| {
            if reply.access_token.as_str().is_empty() {
                Err(SuperAgentError::decode("empty access_token"))
            } else {
                Ok(reply.access_token)
            }
        });

        match result {
            Ok(token) => {
                self.session.authenticate(token);
                info!("[AuthGate] Logged in as {}", username);
                true
            }
            Err(err) => {
                warn!("[AuthGate] Login failed: {}", err);
                self.view.write().await.notice = Some(Notice::from_write_error(
                    &err,
                    messages::LOGIN_FAILED,
                    messages::CONNECTION_ERROR,
                ));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_stores_token() {
        let api = FakeBackend::new();
        api.reply("login", json!({"access_token": "abc"}));
        let session = SessionContext::new();
        let gate = AuthGate::new(api.clone(), session.clone());

        assert!(gate.login("admin", "pw").await);

        assert_eq!(session.require_token().unwrap().as_str(), "abc");
        assert_eq!(api.bodies(), vec![json!({"username": "admin", "password": "pw"})]);
        assert_eq!(gate.view().await.notice, None);
    }

    #[tokio::test]
    async fn test_empty_field_issues_no_request() {
        let api = FakeBackend::new();
        let gate = AuthGate::new(api.clone(), SessionContext::new());

        assert!(!gate.login("admin", "").await);

        assert!(api.calls().is_empty());
        assert_eq!(
            gate.view().await.notice,
            Some(Notice::error(messages::LOGIN_FIELDS_REQUIRED))
        );
    }

    #[tokio::test]
    async fn test_login_failure_messages() {
        let api = FakeBackend::new();
        api.fail("login", SuperAgentError::status(401, Some("Credenziali errate".into())));
        api.fail("login", SuperAgentError::status(500, None));
        api.fail("login", SuperAgentError::transport("refused"));
        let session = SessionContext::new();
        let gate = AuthGate::new(api.clone(), session.clone());

        let mut seen = Vec::new();
        for _ in 0..3 {
            assert!(!gate.login("admin", "pw").await);
            seen.push(gate.view().await.notice.unwrap().text);
        }

        assert_eq!(
            seen,
            vec!["Credenziali errate", messages::LOGIN_FAILED, messages::CONNECTION_ERROR]
        );
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let api = FakeBackend::new();
        api.reply("login", json!({"access_token": ""}));
        let session = SessionContext::new();
        let gate = AuthGate::new(api, session.clone());

        assert!(!gate.login("admin", "pw").await);
        assert!(!session.is_authenticated());
        assert_eq!(gate.view().await.notice.unwrap().text, messages::LOGIN_FAILED);
    }
}
