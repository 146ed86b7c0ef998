//! Console shell for the analysis backend: status probe, analyze, report,
//! LLM assist and a chat that reuses the selected file.

use std::sync::Arc;

use superagent_core::ConsoleApi;
use superagent_core::chat::{ChatRole, ChatTranscript};
use superagent_core::console::{AnalyzeMode, AnalyzeRequest, CommandOutput, LlmAssistRequest};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusIndicator {
    /// Not probed yet.
    #[default]
    Unknown,
    Online(String),
    Offline,
}

impl StatusIndicator {
    pub fn label(&self) -> &str {
        match self {
            Self::Unknown => "...",
            Self::Online(label) => label,
            Self::Offline => "OFFLINE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    System,
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleView {
    pub status: StatusIndicator,
    /// Append-only console pane.
    pub lines: Vec<ConsoleLine>,
    pub transcript: ChatTranscript,
    pub file_path: String,
    pub mode: AnalyzeMode,
}

pub struct ConsoleShell {
    api: Arc<dyn ConsoleApi>,
    view: RwLock<ConsoleView>,
}

impl ConsoleShell {
    pub fn new(api: Arc<dyn ConsoleApi>) -> Self {
        Self {
            api,
            view: RwLock::new(ConsoleView::default()),
        }
    }

    pub async fn view(&self) -> ConsoleView {
        self.view.read().await.clone()
    }

    pub async fn set_file_path(&self, path: impl Into<String>) {
        self.view.write().await.file_path = path.into();
    }

    pub async fn set_mode(&self, mode: AnalyzeMode) {
        self.view.write().await.mode = mode;
    }

    pub async fn initialize(&self) {
        self.append(LineKind::System, messages::CONSOLE_INIT).await;
        self.check_status().await;
    }

    pub async fn check_status(&self) {
        let result = self.api.status().await;

        let mut view = self.view.write().await;
        match result {
            Ok(reply) => {
                let label = reply
                    .status
                    .filter(|status| !status.is_empty())
                    .map(|status| status.to_uppercase())
                    .unwrap_or_else(|| "ONLINE".to_string());
                view.status = StatusIndicator::Online(label);
                push_line(&mut view, LineKind::System, messages::CONSOLE_ONLINE);
            }
            Err(err) => {
                warn!("[ConsoleShell] Status probe failed: {}", err);
                view.status = StatusIndicator::Offline;
                push_line(&mut view, LineKind::System, messages::CONSOLE_OFFLINE);
            }
        }
    }

    /// Analyzes the selected file with the selected mode.
    pub async fn analyze(&self) {
        let (path, mode) = {
            let view = self.view.read().await;
            (view.file_path.trim().to_string(), view.mode)
        };
        if path.is_empty() {
            self.append(LineKind::User, messages::CONSOLE_ANALYZE_PATH_REQUIRED)
                .await;
            return;
        }

        self.append(LineKind::User, format!("[user] Analizza ({}) → {}", mode, path))
            .await;
        match self.api.analyze(&AnalyzeRequest { path, mode }).await {
            Ok(output) => self.append_output("Exit code", output).await,
            Err(err) => {
                warn!("[ConsoleShell] Analyze failed: {}", err);
                self.append(LineKind::Agent, format!("[agent] Errore analisi: {}", err))
                    .await;
            }
        }
    }

    pub async fn report(&self) {
        self.append(LineKind::User, messages::CONSOLE_REPORT_REQUESTED)
            .await;
        match self.api.report().await {
            Ok(output) => self.append_output("Exit code report", output).await,
            Err(err) => {
                warn!("[ConsoleShell] Report failed: {}", err);
                self.append(LineKind::Agent, format!("[agent] Errore report: {}", err))
                    .await;
            }
        }
    }

    /// Sends `instruction` about the selected file; the reply also goes to
    /// the chat transcript.
    pub async fn llm_assist(&self, instruction: &str) {
        let path = self.view.read().await.file_path.trim().to_string();
        if path.is_empty() {
            self.append(LineKind::User, messages::CONSOLE_LLM_PATH_REQUIRED)
                .await;
            return;
        }

        self.append(LineKind::User, format!("[user] LLM assist su {}", path))
            .await;
        let request = LlmAssistRequest {
            path,
            instruction: instruction.trim().to_string(),
        };
        match self.api.llm_assist(&request).await {
            Ok(reply) => {
                let text = reply
                    .output
                    .filter(|output| !output.is_empty())
                    .unwrap_or_else(|| messages::NO_REPLY.to_string());
                let mut view = self.view.write().await;
                push_line(&mut view, LineKind::Agent, messages::CONSOLE_LLM_RECEIVED);
                push_line(&mut view, LineKind::Agent, text.clone());
                view.transcript.push(ChatRole::Agent, text);
            }
            Err(err) => {
                warn!("[ConsoleShell] LLM assist failed: {}", err);
                self.append(LineKind::Agent, format!("[agent] Errore LLM: {}", err))
                    .await;
            }
        }
    }

    /// Chat input: the text becomes the LLM instruction for the selected file.
    pub async fn send_chat(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.view
            .write()
            .await
            .transcript
            .push(ChatRole::User, text);
        self.llm_assist(text).await;
    }

    async fn append_output(&self, prefix: &str, output: CommandOutput) {
        let code = output
            .exit_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "?".to_string());
        let text = output
            .output
            .filter(|output| !output.is_empty())
            .unwrap_or_else(|| messages::NO_OUTPUT.to_string());

        let mut view = self.view.write().await;
        push_line(&mut view, LineKind::Agent, format!("[agent] {}: {}", prefix, code));
        push_line(&mut view, LineKind::Agent, text);
    }

    async fn append(&self, kind: LineKind, text: impl Into<String>) {
        let mut view = self.view.write().await;
        push_line(&mut view, kind, text);
    }
}

fn push_line(view: &mut ConsoleView, kind: LineKind, text: impl Into<String>) {
    let text = text.into();
    debug!("[ConsoleShell] {:?}: {}", kind, text);
    view.lines.push(ConsoleLine { kind, text });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeBackend;
    use serde_json::json;
    use superagent_core::SuperAgentError;

    fn texts(view: &ConsoleView) -> Vec<&str> {
        view.lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_initialize_online() {
        let api = FakeBackend::new();
        api.reply("status", json!({"status": "ready"}));
        let shell = ConsoleShell::new(api);

        shell.initialize().await;

        let view = shell.view().await;
        assert_eq!(view.status, StatusIndicator::Online("READY".into()));
        assert_eq!(texts(&view), vec![messages::CONSOLE_INIT, messages::CONSOLE_ONLINE]);
    }

    #[tokio::test]
    async fn test_status_label_defaults_and_offline() {
        let api = FakeBackend::new();
        api.reply("status", json!({}));
        api.fail("status", SuperAgentError::status(502, None));
        let shell = ConsoleShell::new(api);

        shell.check_status().await;
        assert_eq!(shell.view().await.status.label(), "ONLINE");
        shell.check_status().await;

        let view = shell.view().await;
        assert_eq!(view.status, StatusIndicator::Offline);
        assert_eq!(texts(&view).last(), Some(&messages::CONSOLE_OFFLINE));
    }

    #[tokio::test]
    async fn test_analyze_requires_path() {
        let api = FakeBackend::new();
        let shell = ConsoleShell::new(api.clone());

        shell.set_file_path("   ").await;
        shell.analyze().await;
        shell.llm_assist("spiega").await;

        assert!(api.calls().is_empty());
        assert_eq!(
            texts(&shell.view().await),
            vec![messages::CONSOLE_ANALYZE_PATH_REQUIRED, messages::CONSOLE_LLM_PATH_REQUIRED]
        );
    }

    #[tokio::test]
    async fn test_analyze_security() {
        let api = FakeBackend::new();
        api.reply("analyze", json!({"exit_code": 1, "output": ""}));
        let shell = ConsoleShell::new(api.clone());

        shell.set_file_path("app/main.py").await;
        shell.set_mode(AnalyzeMode::Security).await;
        shell.analyze().await;

        assert_eq!(api.bodies(), vec![json!({"path": "app/main.py", "mode": "security"})]);
        assert_eq!(
            texts(&shell.view().await),
            vec![
                "[user] Analizza (security) → app/main.py",
                "[agent] Exit code: 1",
                messages::NO_OUTPUT,
            ]
        );
    }

    #[tokio::test]
    async fn test_report_failure_goes_to_pane() {
        let api = FakeBackend::new();
        api.fail("report", SuperAgentError::transport("refused"));
        let shell = ConsoleShell::new(api);

        shell.report().await;

        let view = shell.view().await;
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[1].kind, LineKind::Agent);
        assert!(view.lines[1].text.starts_with("[agent] Errore report: "));
    }

    #[tokio::test]
    async fn test_chat_uses_selected_file() {
        let api = FakeBackend::new();
        api.reply("llm_assist:cosa fa?", json!({"output": "Stampa un saluto"}));
        api.reply("llm_assist:e poi?", json!({"output": null}));
        let shell = ConsoleShell::new(api.clone());

        shell.set_file_path("hello.py").await;
        shell.send_chat("  cosa fa?  ").await;
        shell.send_chat("e poi?").await;
        shell.send_chat("   ").await;

        assert_eq!(
            api.bodies()[0],
            json!({"path": "hello.py", "instruction": "cosa fa?"})
        );
        let view = shell.view().await;
        assert_eq!(
            view.transcript.entries(),
            vec![
                (ChatRole::User, "cosa fa?"),
                (ChatRole::Agent, "Stampa un saluto"),
                (ChatRole::User, "e poi?"),
                (ChatRole::Agent, messages::NO_REPLY),
            ]
        );
    }

    #[tokio::test]
    async fn test_chat_failure_only_touches_pane() {
        let api = FakeBackend::new();
        api.fail("llm_assist:ciao", SuperAgentError::status(404, Some("File non trovato".into())));
        let shell = ConsoleShell::new(api);

        shell.set_file_path("missing.py").await;
        shell.send_chat("ciao").await;

        let view = shell.view().await;
        assert_eq!(view.transcript.entries(), vec![(ChatRole::User, "ciao")]);
        assert_eq!(
            texts(&view).last(),
            Some(&"[agent] Errore LLM: HTTP 404: File non trovato")
        );
    }
}
