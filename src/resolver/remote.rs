//! Hosted text-generation backend.
//!
//! Sends the formatted conversation to an inference endpoint:
//!
//! ```text
//! POST {endpoint}{model}
//! Authorization: Bearer {token}
//! {"inputs": "...", "parameters": {"max_new_tokens": 200, "temperature": 0.7, "return_full_text": false}}
//! ```
//!
//! and expects `[{"generated_text": "..."}]` back.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::config::RemoteSettings;
use crate::error::ChatError;
use crate::http::{bearer_headers, shared_client, status_to_error};
use crate::prompt::format_conversation;
use crate::types::Turn;
use crate::util::retry::RetryPolicy;
use crate::util::timeout::with_timeout;

use super::ResponseResolver;

/// Generation parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct InferenceParameters {
    #[builder(default = 200)]
    pub max_new_tokens: u32,
    #[builder(default = 0.7)]
    pub temperature: f64,
    #[builder(default = false)]
    pub return_full_text: bool,
}

impl Default for InferenceParameters {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a InferenceParameters,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: Option<String>,
}

/// Resolver backed by a hosted text-generation model.
#[derive(Clone)]
pub struct RemoteResolver {
    url: String,
    token: String,
    preamble: String,
    parameters: InferenceParameters,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl fmt::Debug for RemoteResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteResolver")
            .field("url", &self.url)
            .field("token", &"..")
            .field("parameters", &self.parameters)
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

impl RemoteResolver {
    pub fn new(url: impl Into<String>, token: impl Into<String>, preamble: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            preamble: preamble.into(),
            parameters: InferenceParameters::default(),
            timeout: Duration::from_secs(30),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Build from configuration. A missing or blank token is rejected.
    pub fn from_settings(settings: &RemoteSettings, preamble: String) -> Result<Self, ChatError> {
        let token = settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ChatError::Configuration(
                    "remote resolver requires a token (set CHATFOLIO_TOKEN or HF_TOKEN)".into(),
                )
            })?;
        bearer_headers(token)?;

        let parameters = InferenceParameters::builder()
            .max_new_tokens(settings.max_new_tokens)
            .temperature(settings.temperature)
            .build();

        Ok(Self::new(
            format!("{}{}", settings.endpoint, settings.model),
            token,
            preamble,
        )
        .with_parameters(parameters)
        .with_timeout(settings.timeout())
        .with_retry_policy(RetryPolicy::with_max_attempts(settings.max_attempts)))
    }

    pub fn with_parameters(mut self, parameters: InferenceParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn generate_once(&self, prompt: &str) -> Result<String, ChatError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: &self.parameters,
        };

        with_timeout(self.timeout, async {
            let response = shared_client()
                .post(&self.url)
                .headers(bearer_headers(&self.token)?)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let text = response.text().await?;
            if !status.is_success() {
                return Err(status_to_error(status.as_u16(), &text));
            }
            parse_generated_text(&text)
        })
        .await
    }
}

fn parse_generated_text(body: &str) -> Result<String, ChatError> {
    let items: Vec<GeneratedText> = serde_json::from_str(body)?;
    items
        .into_iter()
        .next()
        .and_then(|item| item.generated_text)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| ChatError::InvalidResponse("missing generated_text in response".into()))
}

#[async_trait]
impl ResponseResolver for RemoteResolver {
    fn name(&self) -> &str {
        "remote"
    }

    async fn resolve(&self, message: &str, history: &[Turn]) -> Result<String, ChatError> {
        let prompt = format_conversation(&self.preamble, history, message);
        tracing::debug!(url = %self.url, prompt_len = prompt.len(), "requesting generation");
        self.retry_policy
            .execute(|| self.generate_once(&prompt))
            .await
    }
}
