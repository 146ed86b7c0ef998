//! Scripted in-memory backends for panel tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use superagent_core::api::{ConsoleApi, DashboardApi};
use superagent_core::auth::{HealthReply, LoginRequest, LoginResponse};
use superagent_core::chat::{ChatReply, ChatRequest};
use superagent_core::console::{
    AnalyzeRequest, CommandOutput, LlmAssistReply, LlmAssistRequest, StatusReply,
};
use superagent_core::job::{CreateJobRequest, CreateJobResponse, JobDetail, JobId, JobSummary};
use superagent_core::project::{CreateProjectRequest, Project};
use superagent_core::system::{
    ActionRecord, AppList, AuthorizationRule, KillAppRequest, ProcessList, StartAppRequest,
};
use superagent_core::watchdog::{
    MovementRequest, Notification, SetLimitRequest, WatchdogStatus, WatchdogSwitch,
};
use superagent_core::{BearerToken, Result, SessionContext, SuperAgentError};
use tokio::sync::oneshot;

enum Scripted {
    Now(Result<Value>),
    Gated(oneshot::Receiver<()>, Result<Value>),
}

/// Records every call by key and answers from per-key queues.
///
/// Keys are `"<method>"` or `"<method>:<argument>"`, e.g. `"get_job:7"`.
/// A call with nothing scripted fails with a transport error.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<String>>,
    script: Mutex<HashMap<String, VecDeque<Scripted>>>,
    bodies: Mutex<Vec<Value>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, key: &str, value: Value) {
        self.push(key, Scripted::Now(Ok(value)));
    }

    pub fn fail(&self, key: &str, err: SuperAgentError) {
        self.push(key, Scripted::Now(Err(err)));
    }

    /// Reply is held back until the returned sender fires.
    pub fn reply_gated(&self, key: &str, value: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(key, Scripted::Gated(rx, Ok(value)));
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, key: &str) -> usize {
        self.calls().iter().filter(|call| call.as_str() == key).count()
    }

    /// Request bodies in call order.
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn push(&self, key: &str, entry: Scripted) {
        self.script
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(entry);
    }

    fn record_body<B: serde::Serialize>(&self, body: &B) {
        self.bodies
            .lock()
            .unwrap()
            .push(serde_json::to_value(body).unwrap());
    }

    async fn answer<T: DeserializeOwned>(&self, key: String) -> Result<T> {
        self.calls.lock().unwrap().push(key.clone());
        let entry = self
            .script
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);

        let result = match entry {
            Some(Scripted::Now(result)) => result,
            Some(Scripted::Gated(gate, result)) => {
                let _ = gate.await;
                result
            }
            None => Err(SuperAgentError::transport(format!("nothing scripted for {key}"))),
        };
        result.map(|value| serde_json::from_value(value).unwrap())
    }
}

pub fn authenticated_session() -> SessionContext {
    let session = SessionContext::new();
    session.authenticate(BearerToken::new("test-token"));
    session
}

#[async_trait]
impl DashboardApi for FakeBackend {
    async fn health(&self) -> Result<HealthReply> {
        self.answer("health".into()).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.record_body(request);
        self.answer("login".into()).await
    }

    async fn list_jobs(&self, _token: &BearerToken) -> Result<Vec<JobSummary>> {
        self.answer("list_jobs".into()).await
    }

    async fn create_job(
        &self,
        _token: &BearerToken,
        request: &CreateJobRequest,
    ) -> Result<CreateJobResponse> {
        self.record_body(request);
        self.answer("create_job".into()).await
    }

    async fn get_job(&self, _token: &BearerToken, id: &JobId) -> Result<JobDetail> {
        self.answer(format!("get_job:{id}")).await
    }

    async fn chat(&self, _token: &BearerToken, request: &ChatRequest) -> Result<ChatReply> {
        self.answer(format!("chat:{}", request.message)).await
    }

    async fn create_project(
        &self,
        _token: &BearerToken,
        request: &CreateProjectRequest,
    ) -> Result<Project> {
        self.record_body(request);
        self.answer("create_project".into()).await
    }

    async fn scan_apps(&self, _token: &BearerToken) -> Result<AppList> {
        self.answer("scan_apps".into()).await
    }

    async fn start_app(&self, _token: &BearerToken, request: &StartAppRequest) -> Result<()> {
        self.answer(format!("start_app:{}", request.path)).await
    }

    async fn list_processes(&self, _token: &BearerToken) -> Result<ProcessList> {
        self.answer("list_processes".into()).await
    }

    async fn kill_app(&self, _token: &BearerToken, request: &KillAppRequest) -> Result<()> {
        self.answer(format!("kill_app:{}", request.pid)).await
    }

    async fn log_action(&self, _token: &BearerToken, record: &ActionRecord) -> Result<()> {
        self.record_body(record);
        self.answer("log_action".into()).await
    }

    async fn authorize(&self, _token: &BearerToken, rule: &AuthorizationRule) -> Result<()> {
        self.answer(format!("authorize:{}:{}", rule.app, rule.allow)).await
    }

    async fn watchdog_status(&self, _token: &BearerToken) -> Result<WatchdogStatus> {
        self.answer("watchdog_status".into()).await
    }

    async fn watchdog_notifications(&self, _token: &BearerToken) -> Result<Vec<Notification>> {
        self.answer("watchdog_notifications".into()).await
    }

    async fn switch_watchdog(&self, _token: &BearerToken, switch: WatchdogSwitch) -> Result<()> {
        let key = match switch {
            WatchdogSwitch::Activate => "watchdog_activate",
            WatchdogSwitch::Deactivate => "watchdog_deactivate",
        };
        self.answer(key.into()).await
    }

    async fn set_watchdog_limit(
        &self,
        _token: &BearerToken,
        request: &SetLimitRequest,
    ) -> Result<()> {
        self.record_body(request);
        self.answer("set_limit".into()).await
    }

    async fn add_movement(&self, _token: &BearerToken, request: &MovementRequest) -> Result<()> {
        self.record_body(request);
        self.answer("add_movement".into()).await
    }
}

#[async_trait]
impl ConsoleApi for FakeBackend {
    async fn status(&self) -> Result<StatusReply> {
        self.answer("status".into()).await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<CommandOutput> {
        self.record_body(request);
        self.answer("analyze".into()).await
    }

    async fn report(&self) -> Result<CommandOutput> {
        self.answer("report".into()).await
    }

    async fn llm_assist(&self, request: &LlmAssistRequest) -> Result<LlmAssistReply> {
        self.record_body(request);
        self.answer(format!("llm_assist:{}", request.instruction)).await
    }
}
