//! Shared `reqwest` plumbing behind both backend adapters.

use std::time::Duration;

use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;
use superagent_core::api::{AuthPolicy, HttpMethod, ResourceRequest, ResourceResponse};
use superagent_core::config::EndpointConfig;
use superagent_core::{Result, SuperAgentError};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RestTransport {
    client: Client,
    base_url: String,
}

impl RestTransport {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = endpoint.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| SuperAgentError::config(format!("HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `request`, attaching the bearer only under [`AuthPolicy::Bearer`].
    pub async fn send(
        &self,
        request: ResourceRequest,
        policy: AuthPolicy,
    ) -> Result<ResourceResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("[RestTransport] {:?} {}", request.method, url);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let (AuthPolicy::Bearer, Some(token)) = (policy, &request.bearer) {
            builder = builder.header(AUTHORIZATION, token.header_value());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| SuperAgentError::transport(format!("{url}: {err}")))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| SuperAgentError::transport(format!("{url}: {err}")))?;

        debug!("[RestTransport] {} -> {}", url, status);
        Ok(ResourceResponse::new(status, parse_body(&text)))
    }
}

/// Empty or non-JSON bodies become `Value::Null`.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("<html>oops</html>"), Value::Null);
        assert_eq!(parse_body(r#"{"msg":"ok"}"#), json!({"msg": "ok"}));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let transport = RestTransport::new(&EndpointConfig {
            base_url: "http://localhost:5000/".into(),
            timeout_secs: Some(3),
        })
        .unwrap();
        assert_eq!(transport.base_url(), "http://localhost:5000");
    }
}
