//! Adapter for the panel dashboard backend.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use superagent_core::api::{AuthPolicy, DashboardApi, ResourceClient, ResourceRequest, ResourceResponse};
use superagent_core::auth::{HealthReply, LoginRequest, LoginResponse};
use superagent_core::chat::{ChatReply, ChatRequest};
use superagent_core::config::EndpointConfig;
use superagent_core::job::{CreateJobRequest, CreateJobResponse, JobDetail, JobId, JobSummary};
use superagent_core::project::{CreateProjectRequest, Project};
use superagent_core::system::{
    ActionRecord, AppList, AuthorizationRule, KillAppRequest, ProcessList, StartAppRequest,
};
use superagent_core::watchdog::{
    MovementRequest, Notification, SetLimitRequest, WatchdogStatus, WatchdogSwitch,
};
use superagent_core::{BearerToken, Result};

use crate::routes;
use crate::transport::RestTransport;

/// Talks to the dashboard with `Authorization: Bearer` on every route
/// except login and health.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    transport: RestTransport,
}

impl DashboardClient {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        Ok(Self {
            transport: RestTransport::new(endpoint)?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &BearerToken) -> Result<T> {
        self.send(ResourceRequest::get(path).with_bearer(token))
            .await?
            .into_json()
    }

    async fn post_json<B, T>(&self, path: &str, token: &BearerToken, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(ResourceRequest::post(path, body)?.with_bearer(token))
            .await?
            .into_json()
    }

    async fn post_unit<B>(&self, path: &str, token: &BearerToken, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(ResourceRequest::post(path, body)?.with_bearer(token))
            .await?
            .into_unit()
    }
}

#[async_trait]
impl ResourceClient for DashboardClient {
    fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    fn auth_policy(&self) -> AuthPolicy {
        AuthPolicy::Bearer
    }

    async fn send(&self, request: ResourceRequest) -> Result<ResourceResponse> {
        self.transport.send(request, self.auth_policy()).await
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn health(&self) -> Result<HealthReply> {
        self.send(ResourceRequest::get(routes::HEALTH))
            .await?
            .into_json()
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.send(ResourceRequest::post(routes::LOGIN, request)?)
            .await?
            .into_json()
    }

    async fn list_jobs(&self, token: &BearerToken) -> Result<Vec<JobSummary>> {
        self.get_json(routes::DISTRIBUTED_JOBS, token).await
    }

    async fn create_job(
        &self,
        token: &BearerToken,
        request: &CreateJobRequest,
    ) -> Result<CreateJobResponse> {
        self.post_json(routes::DISTRIBUTED_JOBS, token, request).await
    }

    async fn get_job(&self, token: &BearerToken, id: &JobId) -> Result<JobDetail> {
        self.get_json(&routes::job(id), token).await
    }

    async fn chat(&self, token: &BearerToken, request: &ChatRequest) -> Result<ChatReply> {
        self.post_json(routes::CHAT, token, request).await
    }

    async fn create_project(
        &self,
        token: &BearerToken,
        request: &CreateProjectRequest,
    ) -> Result<Project> {
        self.post_json(routes::GRAPHIC_WEB_PROJECT, token, request).await
    }

    async fn scan_apps(&self, token: &BearerToken) -> Result<AppList> {
        self.get_json(routes::SCAN_APPS, token).await
    }

    async fn start_app(&self, token: &BearerToken, request: &StartAppRequest) -> Result<()> {
        self.post_unit(routes::START_APP, token, request).await
    }

    async fn list_processes(&self, token: &BearerToken) -> Result<ProcessList> {
        self.get_json(routes::LIST_PROCESSES, token).await
    }

    async fn kill_app(&self, token: &BearerToken, request: &KillAppRequest) -> Result<()> {
        self.post_unit(routes::KILL_APP, token, request).await
    }

    async fn log_action(&self, token: &BearerToken, record: &ActionRecord) -> Result<()> {
        self.post_unit(routes::LOG_ACTION, token, record).await
    }

    async fn authorize(&self, token: &BearerToken, rule: &AuthorizationRule) -> Result<()> {
        self.post_unit(routes::AUTHORIZE, token, rule).await
    }

    async fn watchdog_status(&self, token: &BearerToken) -> Result<WatchdogStatus> {
        self.get_json(routes::WATCHDOG_STATUS, token).await
    }

    async fn watchdog_notifications(&self, token: &BearerToken) -> Result<Vec<Notification>> {
        self.get_json(routes::WATCHDOG_NOTIFICATIONS, token).await
    }

    async fn switch_watchdog(&self, token: &BearerToken, switch: WatchdogSwitch) -> Result<()> {
        self.post_unit(routes::watchdog_switch(switch), token, &json!({}))
            .await
    }

    async fn set_watchdog_limit(
        &self,
        token: &BearerToken,
        request: &SetLimitRequest,
    ) -> Result<()> {
        self.post_unit(routes::WATCHDOG_SET_LIMIT, token, request).await
    }

    async fn add_movement(&self, token: &BearerToken, request: &MovementRequest) -> Result<()> {
        self.post_unit(routes::WATCHDOG_ADD_MOVEMENT, token, request)
            .await
    }
}
