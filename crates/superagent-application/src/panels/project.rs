//! Graphic / web project creation.

use std::sync::Arc;

use superagent_core::project::{CreateProjectRequest, Project, ProjectKind};
use superagent_core::{DashboardApi, SessionContext, SuperAgentError};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::messages;
use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub nome: String,
    pub descrizione: String,
    pub tipo: ProjectKind,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            nome: "App Creativa".to_string(),
            descrizione: "Un progetto grafico e web completo".to_string(),
            tipo: ProjectKind::Webapp,
        }
    }
}

impl ProjectForm {
    fn to_request(&self) -> Result<CreateProjectRequest, SuperAgentError> {
        if self.nome.is_empty() || self.descrizione.is_empty() {
            return Err(SuperAgentError::validation(messages::PROJECT_FIELDS_REQUIRED));
        }
        Ok(CreateProjectRequest {
            nome: self.nome.clone(),
            descrizione: self.descrizione.clone(),
            tipo: self.tipo,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectView {
    pub result: Option<Project>,
    pub notice: Option<Notice>,
}

pub struct ProjectPanel {
    api: Arc<dyn DashboardApi>,
    session: SessionContext,
    view: RwLock<ProjectView>,
}

impl ProjectPanel {
    pub fn new(api: Arc<dyn DashboardApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            view: RwLock::new(ProjectView::default()),
        }
    }

    pub async fn view(&self) -> ProjectView {
        self.view.read().await.clone()
    }

    /// Submits the form and shows the record the backend echoes back.
    pub async fn submit(&self, form: &ProjectForm) {
        self.view.write().await.notice = None;

        let result = match (form.to_request(), self.session.require_token()) {
            (Ok(request), Ok(token)) => self.api.create_project(&token, &request).await,
            (Err(err), _) | (_, Err(err)) => Err(err),
        };

        let mut view = self.view.write().await;
        match result {
            Ok(project) => {
                info!("[ProjectPanel] Created project {} ({})", project.nome, project.tipo);
                view.result = Some(project);
            }
            Err(err) => {
                warn!("[ProjectPanel] Project creation failed: {}", err);
                view.notice = Some(Notice::from_write_error(
                    &err,
                    messages::PROJECT_CREATE_FAILED,
                    messages::CONNECTION_ERROR,
                ));
            }
        }
    }
}
