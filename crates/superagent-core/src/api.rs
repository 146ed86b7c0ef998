//! Capability traits implemented by the HTTP adapters in `superagent-interaction`.
//!
//! [`ResourceClient`] is the low-level seam shared by both backends: a base
//! URL, an [`AuthPolicy`] and a way to send one JSON request. The typed
//! [`DashboardApi`] and [`ConsoleApi`] traits sit on top and are what the
//! panels depend on.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{HealthReply, LoginRequest, LoginResponse};
use crate::chat::{ChatReply, ChatRequest};
use crate::console::{AnalyzeRequest, CommandOutput, LlmAssistReply, LlmAssistRequest, StatusReply};
use crate::error::{Result, SuperAgentError};
use crate::job::{CreateJobRequest, CreateJobResponse, JobDetail, JobId, JobSummary};
use crate::project::{CreateProjectRequest, Project};
use crate::session::BearerToken;
use crate::system::{
    ActionRecord, AppList, AuthorizationRule, KillAppRequest, ProcessList, StartAppRequest,
};
use crate::watchdog::{
    MovementRequest, Notification, SetLimitRequest, WatchdogStatus, WatchdogSwitch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// How an adapter treats credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Attach `Authorization: Bearer <token>` whenever the request carries a token.
    Bearer,
    /// Never send credentials.
    Anonymous,
}

/// One JSON request relative to the adapter's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<BearerToken>,
}

impl ResourceRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
            bearer: None,
        }
    }

    /// Builds a POST with `body` serialized to JSON.
    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Ok(Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
            bearer: None,
        })
    }

    pub fn with_bearer(mut self, token: &BearerToken) -> Self {
        self.bearer = Some(token.clone());
        self
    }
}

/// Status code plus the parsed body (`Value::Null` when the body is empty or not JSON).
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResponse {
    pub status: u16,
    pub body: Value,
}

impl ResourceResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable message of the body.
    ///
    /// The dashboard backend uses `msg`, the console backend `detail`, and a
    /// few dashboard routes `error`.
    pub fn message(&self) -> Option<String> {
        ["msg", "detail", "error"]
            .iter()
            .find_map(|key| self.body.get(key).and_then(Value::as_str))
            .map(str::to_string)
    }

    /// Decodes a successful body into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(SuperAgentError::status(self.status, self.message()));
        }
        let server_message = self.message();
        serde_json::from_value(self.body).map_err(|err| SuperAgentError::Decode {
            message: err.to_string(),
            server_message,
        })
    }

    /// Checks the status and discards the body.
    pub fn into_unit(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(SuperAgentError::status(self.status, self.message()))
        }
    }
}

/// Minimal HTTP capability shared by both backend adapters.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    fn base_url(&self) -> &str;

    fn auth_policy(&self) -> AuthPolicy;

    /// Sends one request. Non-success statuses are returned as responses,
    /// only transport failures become errors.
    async fn send(&self, request: ResourceRequest) -> Result<ResourceResponse>;
}

/// Typed operations of the panel dashboard backend.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn health(&self) -> Result<HealthReply>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    async fn list_jobs(&self, token: &BearerToken) -> Result<Vec<JobSummary>>;

    async fn create_job(
        &self,
        token: &BearerToken,
        request: &CreateJobRequest,
    ) -> Result<CreateJobResponse>;

    async fn get_job(&self, token: &BearerToken, id: &JobId) -> Result<JobDetail>;

    async fn chat(&self, token: &BearerToken, request: &ChatRequest) -> Result<ChatReply>;

    async fn create_project(
        &self,
        token: &BearerToken,
        request: &CreateProjectRequest,
    ) -> Result<Project>;

    async fn scan_apps(&self, token: &BearerToken) -> Result<AppList>;

    async fn start_app(&self, token: &BearerToken, request: &StartAppRequest) -> Result<()>;

    async fn list_processes(&self, token: &BearerToken) -> Result<ProcessList>;

    async fn kill_app(&self, token: &BearerToken, request: &KillAppRequest) -> Result<()>;

    async fn log_action(&self, token: &BearerToken, record: &ActionRecord) -> Result<()>;

    async fn authorize(&self, token: &BearerToken, rule: &AuthorizationRule) -> Result<()>;

    async fn watchdog_status(&self, token: &BearerToken) -> Result<WatchdogStatus>;

    async fn watchdog_notifications(&self, token: &BearerToken) -> Result<Vec<Notification>>;

    async fn switch_watchdog(&self, token: &BearerToken, switch: WatchdogSwitch) -> Result<()>;

    async fn set_watchdog_limit(
        &self,
        token: &BearerToken,
        request: &SetLimitRequest,
    ) -> Result<()>;

    async fn add_movement(&self, token: &BearerToken, request: &MovementRequest) -> Result<()>;
}

/// Typed operations of the console backend. None of them are authenticated.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn status(&self) -> Result<StatusReply>;

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<CommandOutput>;

    async fn report(&self) -> Result<CommandOutput>;

    async fn llm_assist(&self, request: &LlmAssistRequest) -> Result<LlmAssistReply>;
}
