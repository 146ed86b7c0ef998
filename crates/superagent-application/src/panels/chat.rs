//! Chat with the Super Agent.

use std::sync::Arc;

use superagent_core::chat::{ChatRequest, ChatRole, ChatTranscript};
use superagent_core::{DashboardApi, SessionContext};
use tokio::sync::RwLock;
use tracing::warn;

use crate::messages;
use crate::notice::Notice;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatView {
    pub transcript: ChatTranscript,
    pub notice: Option<Notice>,
    /// Requests still waiting for a reply.
    pub pending: usize,
}

pub struct ChatPanel {
    api: Arc<dyn DashboardApi>,
    session: SessionContext,
    view: RwLock<ChatView>,
}

impl ChatPanel {
    pub fn new(api: Arc<dyn DashboardApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            view: RwLock::new(ChatView::default()),
        }
    }

    pub async fn view(&self) -> ChatView {
        self.view.read().await.clone()
    }

    /// Appends `input` and, once the backend answers, the reply.
    ///
    /// Blank input is ignored. Replies land in arrival order, so two
    /// overlapping sends may see their answers swapped.
    pub async fn send(&self, input: &str) {
        if input.trim().is_empty() {
            return;
        }

        let token = {
            let mut view = self.view.write().await;
            view.notice = None;
            match self.session.require_token() {
                Ok(token) => {
                    view.transcript.push(ChatRole::User, input);
                    view.pending += 1;
                    token
                }
                Err(err) => {
                    view.notice = Some(Notice::from_fixed_error(&err, messages::CHAT_FAILED));
                    return;
                }
            }
        };

        let request = ChatRequest {
            message: input.to_string(),
        };
        let result = self.api.chat(&token, &request).await;

        let mut view = self.view.write().await;
        view.pending -= 1;
        match result {
            Ok(reply) => view.transcript.push(ChatRole::Agent, reply.response),
            Err(err) => {
                warn!("[ChatPanel] Chat request failed: {}", err);
                view.notice = Some(Notice::from_fixed_error(&err, messages::CHAT_FAILED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeBackend, authenticated_session};
    use serde_json::json;
    use superagent_core::SuperAgentError;

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let api = FakeBackend::new();
        let panel = ChatPanel::new(api.clone(), authenticated_session());

        panel.send("   ").await;

        assert!(api.calls().is_empty());
        assert!(panel.view().await.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_replies_append_in_arrival_order() {
        let api = FakeBackend::new();
        let release_a = api.reply_gated("chat:a", json!({"response": "reply-a"}));
        let release_b = api.reply_gated("chat:b", json!({"response": "reply-b"}));
        let panel = Arc::new(ChatPanel::new(api.clone(), authenticated_session()));

        let send_a = tokio::spawn({
            let panel = panel.clone();
            async move { panel.send("a").await }
        });
        while api.count("chat:a") < 1 {
            tokio::task::yield_now().await;
        }
        let send_b = tokio::spawn({
            let panel = panel.clone();
            async move { panel.send("b").await }
        });
        while api.count("chat:b") < 1 {
            tokio::task::yield_now().await;
        }
        assert_eq!(panel.view().await.pending, 2);

        release_b.send(()).unwrap();
        send_b.await.unwrap();
        release_a.send(()).unwrap();
        send_a.await.unwrap();

        let view = panel.view().await;
        assert_eq!(
            view.transcript.entries(),
            vec![
                (ChatRole::User, "a"),
                (ChatRole::User, "b"),
                (ChatRole::Agent, "reply-b"),
                (ChatRole::Agent, "reply-a"),
            ]
        );
        assert_eq!(view.pending, 0);
    }

    #[tokio::test]
    async fn test_failure_appends_nothing() {
        let api = FakeBackend::new();
        api.fail("chat:ciao", SuperAgentError::status(500, Some("boom".into())));
        let panel = ChatPanel::new(api, authenticated_session());

        panel.send("ciao").await;

        let view = panel.view().await;
        assert_eq!(view.transcript.entries(), vec![(ChatRole::User, "ciao")]);
        assert_eq!(view.notice, Some(Notice::error(messages::CHAT_FAILED)));
    }
}
