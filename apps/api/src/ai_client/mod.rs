//! AI gateway client: the single point of contact with the generation service.
//!
//! No other module talks to the service directly. One POST per call, no retries;
//! HTTP failures are mapped onto `AppError` kinds here.
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;

pub mod types;

pub use types::{Content, GenerateContentRequest, GenerateContentResponse};

/// Produces text for a generation request. `AiClient` is the production
/// backend; handlers only see `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerateContentRequest) -> Result<String, AppError>;
}

#[derive(Clone)]
pub struct AiClient {
    client: Client,
    /// Endpoint URL and token; `None` unless both are configured.
    credentials: Option<(String, String)>,
}

impl AiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.ai_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            credentials: config
                .ai_credentials()
                .map(|(endpoint, token)| (endpoint.to_string(), token.to_string())),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn send(
        &self,
        endpoint: &str,
        auth_token: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, auth_token)
            .json(request)
            .send()
            .await
            .context("AI service request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!("AI service returned {}", status);
            let status_text = status.canonical_reason().unwrap_or("unknown status");
            return Err(AppError::from_upstream_status(status.as_u16(), status_text).into());
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("AI service returned a malformed response body")?;

        debug!("AI service returned {} candidate(s)", body.candidates.len());

        body.first_candidate_text()
            .ok_or_else(|| anyhow!("AI service response contained no candidates"))
    }
}

#[async_trait]
impl TextGenerator for AiClient {
    async fn generate(&self, request: GenerateContentRequest) -> Result<String, AppError> {
        let Some((endpoint, auth_token)) = &self.credentials else {
            return Err(AppError::Configuration);
        };

        self.send(endpoint, auth_token, &request)
            .await
            .map_err(|e| AppError::classify(e, "process AI service request"))
    }
}
