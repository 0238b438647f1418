//! HTTP client for a remote generation proxy

use super::AlternativeGenerator;
use crate::error::GenerationFailure;
use crate::proxy::GenerateAlternativesRequest;
use crate::types::GeneratedAlternative;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const INVALID_RESPONSE: &str = "Invalid response from generation service";

pub struct ProxyClient {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl ProxyClient {
    /// `url` is the full endpoint, e.g. `http://127.0.0.1:3100/generate-alternatives`
    pub fn new(url: impl Into<String>, token: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            token,
        })
    }
}

#[async_trait]
impl AlternativeGenerator for ProxyClient {
    async fn generate(
        &self,
        title: &str,
        description: &str,
        count: usize,
    ) -> Result<Vec<GeneratedAlternative>, GenerationFailure> {
        let body = GenerateAlternativesRequest {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            count: Some(count),
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token).header("apikey", token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, url = %self.url, "generation request failed");
            GenerationFailure::new(format!("Failed to reach generation service: {}", e))
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationFailure::new(format!("Failed to read generation response: {}", e)))?;

        interpret_reply(status, &text, count)
    }
}

/// Turn a proxy reply into alternatives or a failure message
pub fn interpret_reply(
    status: u16,
    body: &str,
    count: usize,
) -> Result<Vec<GeneratedAlternative>, GenerationFailure> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !(200..300).contains(&status) => {
            return Err(GenerationFailure::new(format!(
                "Generation service returned status {}",
                status
            )))
        }
        Err(_) => return Err(GenerationFailure::new(INVALID_RESPONSE)),
    };

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(GenerationFailure::new(message));
    }
    if !(200..300).contains(&status) {
        return Err(GenerationFailure::new(format!(
            "Generation service returned status {}",
            status
        )));
    }

    let items = value
        .get("alternatives")
        .and_then(Value::as_array)
        .ok_or_else(|| GenerationFailure::new(INVALID_RESPONSE))?;

    let mut alternatives = Vec::with_capacity(items.len().min(count));
    for item in items {
        let text = item
            .as_str()
            .ok_or_else(|| GenerationFailure::new(INVALID_RESPONSE))?
            .trim();
        if !text.is_empty() && alternatives.len() < count {
            alternatives.push(GeneratedAlternative {
                text: text.to_string(),
            });
        }
    }

    Ok(alternatives)
}
