//! Upstream text-generation endpoint
//!
//! One OpenAI-compatible chat completion per call. No retries, no streaming.

use crate::config::{ProxyConfig, API_KEY_ENV};
use crate::error::ProxyError;
use async_trait::async_trait;
use serde::Deserialize;

/// A model that answers a system + user message pair with free text
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the reply content, `None` when the model sent nothing
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, ProxyError>;
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletion {
    /// `choices[0].message.content`
    pub fn content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

/// Map a non-success upstream status onto the proxy taxonomy
pub fn classify_status(status: u16) -> Option<ProxyError> {
    match status {
        200..=299 => None,
        429 => Some(ProxyError::RateLimited),
        402 => Some(ProxyError::InsufficientCredits),
        other => Some(ProxyError::UpstreamError { status: other }),
    }
}

/// Chat model reached over HTTP with a bearer key
pub struct HttpChatModel {
    client: reqwest::Client,
    config: ProxyConfig,
}

impl HttpChatModel {
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProxyError::unknown)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatModel for HttpChatModel {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, ProxyError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProxyError::Unknown(format!("{} is not configured", API_KEY_ENV)))?;

        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ]
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ProxyError::Unknown(format!("upstream request failed: {}", e)))?;

        let status = response.status().as_u16();
        if let Some(err) = classify_status(status) {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status, body = %error_text, "AI gateway error");
            return Err(err);
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| ProxyError::Unknown(format!("invalid upstream response: {}", e)))?;

        Ok(completion.content())
    }
}
