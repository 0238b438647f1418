//! Generation proxy
//!
//! Server-side pipeline turning `{title, description?, count?}` into a clean
//! list of alternatives:
//!
//! ```text
//! request → validate title → build prompts → ChatModel::complete
//!         → empty check → parse::parse_alternatives → {alternatives}
//! ```
//!
//! Every failure maps onto [`ProxyError`]; nothing is retried.

pub mod parse;
pub mod prompt;
pub mod routes;
pub mod upstream;

use crate::error::{GenerationFailure, ProxyError};
use crate::generator::AlternativeGenerator;
use crate::types::{GeneratedAlternative, GenerationRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use upstream::ChatModel;

/// Wire body of `POST /generate-alternatives`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateAlternativesRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Absent or zero means the default of 3
    #[serde(default)]
    pub count: Option<usize>,
}

/// Successful wire response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAlternativesResponse {
    pub alternatives: Vec<String>,
}

/// The stateless generation pipeline
#[derive(Clone)]
pub struct GenerationProxy {
    model: Arc<dyn ChatModel>,
}

impl GenerationProxy {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Validate a wire request and run the pipeline
    pub async fn handle(
        &self,
        request: GenerateAlternativesRequest,
    ) -> Result<GenerateAlternativesResponse, ProxyError> {
        let title = request.title.unwrap_or_default();
        let request = GenerationRequest::new(
            &title,
            request.description.as_deref().unwrap_or(""),
            request.count.unwrap_or(0),
        );
        let alternatives = self.generate(&request).await?;
        Ok(GenerateAlternativesResponse { alternatives })
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, ProxyError> {
        if request.title.trim().is_empty() {
            return Err(ProxyError::MissingTitle);
        }

        let user_prompt = prompt::build_user_prompt(request);
        let content = self
            .model
            .complete(prompt::SYSTEM_PROMPT, &user_prompt)
            .await?
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProxyError::EmptyResponse)?;

        let alternatives = parse::parse_alternatives(&content, request.count)?;
        tracing::debug!(
            requested = request.count,
            produced = alternatives.len(),
            "alternatives generated"
        );
        Ok(alternatives)
    }
}

#[async_trait]
impl AlternativeGenerator for GenerationProxy {
    async fn generate(
        &self,
        title: &str,
        description: &str,
        count: usize,
    ) -> Result<Vec<GeneratedAlternative>, GenerationFailure> {
        let request = GenerationRequest::new(title, description, count);
        let alternatives = GenerationProxy::generate(self, &request).await?;
        Ok(alternatives
            .into_iter()
            .map(|text| GeneratedAlternative { text })
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted upstream: replays one canned outcome, records the prompts
    pub struct ScriptedModel {
        outcome: Mutex<Option<Result<Option<String>, ProxyError>>>,
        pub calls: AtomicUsize,
        pub last_user_prompt: Mutex<Option<String>>,
    }

    impl ScriptedModel {
        pub fn replying(content: &str) -> Arc<Self> {
            Self::with(Ok(Some(content.to_string())))
        }

        pub fn with(outcome: Result<Option<String>, ProxyError>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(outcome)),
                calls: AtomicUsize::new(0),
                last_user_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, _system: &str, user: &str) -> Result<Option<String>, ProxyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user_prompt.lock().unwrap() = Some(user.to_string());
            self.outcome
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(ProxyError::unknown("scripted model called twice")))
        }
    }
}
