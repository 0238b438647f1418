//! Alternative generators
//!
//! Three implementations share one trait and are picked at composition time:
//! - [`TemplateGenerator`]: local phrase pool, no network
//! - [`ProxyClient`]: HTTP call to a running generation proxy
//! - [`crate::proxy::GenerationProxy`]: the proxy pipeline run in-process

pub mod client;
pub mod template;

pub use client::ProxyClient;
pub use template::TemplateGenerator;

use crate::error::GenerationFailure;
use crate::types::GeneratedAlternative;
use async_trait::async_trait;

/// Produces concrete options for a decision
///
/// A single attempt per call: no caching, no retries. Implementations never
/// return more than `count` items.
#[async_trait]
pub trait AlternativeGenerator: Send + Sync {
    async fn generate(
        &self,
        title: &str,
        description: &str,
        count: usize,
    ) -> Result<Vec<GeneratedAlternative>, GenerationFailure>;
}
