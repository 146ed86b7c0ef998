//! Adapter for the console shell backend. It never sends credentials.

use async_trait::async_trait;
use superagent_core::Result;
use superagent_core::api::{AuthPolicy, ConsoleApi, ResourceClient, ResourceRequest, ResourceResponse};
use superagent_core::config::EndpointConfig;
use superagent_core::console::{
    AnalyzeRequest, CommandOutput, LlmAssistReply, LlmAssistRequest, StatusReply,
};

use crate::routes;
use crate::transport::RestTransport;

#[derive(Debug, Clone)]
pub struct ConsoleClient {
    transport: RestTransport,
}

impl ConsoleClient {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        Ok(Self {
            transport: RestTransport::new(endpoint)?,
        })
    }
}

#[async_trait]
impl ResourceClient for ConsoleClient {
    fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    fn auth_policy(&self) -> AuthPolicy {
        AuthPolicy::Anonymous
    }

    async fn send(&self, request: ResourceRequest) -> Result<ResourceResponse> {
        self.transport.send(request, self.auth_policy()).await
    }
}

#[async_trait]
impl ConsoleApi for ConsoleClient {
    async fn status(&self) -> Result<StatusReply> {
        self.send(ResourceRequest::get(routes::CONSOLE_STATUS))
            .await?
            .into_json()
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<CommandOutput> {
        self.send(ResourceRequest::post(routes::CONSOLE_ANALYZE, request)?)
            .await?
            .into_json()
    }

    async fn report(&self) -> Result<CommandOutput> {
        self.send(ResourceRequest::get(routes::CONSOLE_REPORT))
            .await?
            .into_json()
    }

    async fn llm_assist(&self, request: &LlmAssistRequest) -> Result<LlmAssistReply> {
        self.send(ResourceRequest::post(routes::CONSOLE_LLM_ASSIST, request)?)
            .await?
            .into_json()
    }
}
