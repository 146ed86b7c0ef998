//! Distributed jobs: list, create and detail.

use std::sync::Arc;

use serde_json::Value;
use superagent_core::freshness::{DataVersion, Dependencies, RefreshGate};
use superagent_core::job::{CreateJobRequest, JobDetail, JobId, JobSummary};
use superagent_core::{DashboardApi, SessionContext, SuperAgentError};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::messages;
use crate::notice::Notice;
use crate::read_slot::ReadSlot;

/// Create-job form. `config` is JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobForm {
    pub agent_id: String,
    pub config: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            agent_id: String::new(),
            config: "{}".to_string(),
        }
    }
}

impl JobForm {
    fn to_request(&self) -> Result<CreateJobRequest, SuperAgentError> {
        if self.agent_id.is_empty() {
            return Err(SuperAgentError::validation(messages::AGENT_ID_REQUIRED));
        }
        let config: Value = serde_json::from_str(&self.config)
            .map_err(|_| SuperAgentError::validation(messages::JOB_CREATE_CONNECTION))?;
        Ok(CreateJobRequest {
            agent_id: self.agent_id.clone(),
            config,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobsView {
    pub jobs: Vec<JobSummary>,
    pub selected: Option<JobId>,
    pub detail: Option<JobDetail>,
    pub notice: Option<Notice>,
}

pub struct JobsPanel {
    api: Arc<dyn DashboardApi>,
    session: SessionContext,
    view: RwLock<JobsView>,
    /// Bumped whenever a detail load lands; the list follows it.
    version: DataVersion,
    gate: RefreshGate,
    list_slot: ReadSlot,
    detail_slot: ReadSlot,
}

impl JobsPanel {
    pub fn new(api: Arc<dyn DashboardApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            view: RwLock::new(JobsView::default()),
            version: DataVersion::new(),
            gate: RefreshGate::new(),
            list_slot: ReadSlot::new("job list"),
            detail_slot: ReadSlot::new("job detail"),
        }
    }

    pub async fn view(&self) -> JobsView {
        self.view.read().await.clone()
    }

    pub async fn mount(&self) {
        self.sync().await;
    }

    /// Reloads the list if the session or the data version moved.
    pub async fn sync(&self) {
        let deps = Dependencies {
            session_generation: self.session.generation(),
            data_version: self.version.current(),
        };
        if self.gate.should_refresh(deps) {
            self.refresh().await;
        }
    }

    /// Unconditional list reload.
    pub async fn refresh(&self) {
        let token = match self.session.require_token() {
            Ok(token) => token,
            Err(err) => {
                self.view.write().await.notice = Some(Notice::from_fixed_error(&err, messages::JOBS_LOAD_FAILED));
                return;
            }
        };

        let ticket = self.list_slot.begin(&self.session);
        let result = self.api.list_jobs(&token).await;

        let mut view = self.view.write().await;
        if !self.list_slot.accepts(&self.session, ticket) {
            return;
        }
        match result {
            Ok(jobs) => {
                debug!("[JobsPanel] Loaded {} jobs", jobs.len());
                view.jobs = jobs;
            }
            Err(err) => {
                warn!("[JobsPanel] Job list failed: {}", err);
                view.notice = Some(Notice::from_fixed_error(&err, messages::JOBS_LOAD_FAILED));
            }
        }
    }

    /// Submits the form; on success the new job becomes the selection.
    pub async fn create_job(&self, form: &JobForm) {
        self.view.write().await.notice = None;

        let request = match form.to_request() {
            Ok(request) => request,
            Err(err) => {
                self.view.write().await.notice = Some(Notice::from_write_error(
                    &err,
                    messages::JOB_CREATE_FAILED,
                    messages::JOB_CREATE_CONNECTION,
                ));
                return;
            }
        };

        let result = match self.session.require_token() {
            Ok(token) => self.api.create_job(&token, &request).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(created) => {
                debug!("[JobsPanel] Created job {}", created.job_id);
                self.select_job(created.job_id).await;
            }
            Err(err) => {
                warn!("[JobsPanel] Job creation failed: {}", err);
                self.view.write().await.notice = Some(Notice::from_write_error(
                    &err,
                    messages::JOB_CREATE_FAILED,
                    messages::JOB_CREATE_CONNECTION,
                ));
            }
        }
    }

    /// Selects `id` and loads its detail. Does nothing when that detail is
    /// already shown.
    pub async fn select_job(&self, id: JobId) {
        {
            let mut view = self.view.write().await;
            if view.detail.as_ref().map(|detail| &detail.id) == Some(&id) {
                return;
            }
            view.selected = Some(id.clone());
        }
        self.load_detail(&id).await;
    }

    async fn load_detail(&self, id: &JobId) {
        let token = match self.session.require_token() {
            Ok(token) => token,
            Err(err) => {
                self.view.write().await.notice = Some(Notice::from_fixed_error(&err, messages::JOB_DETAIL_FAILED));
                return;
            }
        };

        let ticket = self.detail_slot.begin(&self.session);
        let result = self.api.get_job(&token, id).await;

        {
            let mut view = self.view.write().await;
            if !self.detail_slot.accepts(&self.session, ticket) {
                return;
            }
            match result {
                Ok(detail) => view.detail = Some(detail),
                Err(err) => {
                    warn!("[JobsPanel] Detail of job {} failed: {}", id, err);
                    // The selection follows the detail still on screen.
                    view.selected = view.detail.as_ref().map(|detail| detail.id.clone());
                    view.notice = Some(Notice::from_fixed_error(&err, messages::JOB_DETAIL_FAILED));
                    return;
                }
            }
        }

        self.version.bump();
        self.sync().await;
    }
}
