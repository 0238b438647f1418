//! Runtime configuration
//!
//! Secrets and endpoints come from the environment (a `.env` file is loaded
//! by the binary). Everything has a default except the upstream API key.

use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";
pub const API_URL_ENV: &str = "AI_GATEWAY_URL";
pub const MODEL_ENV: &str = "AI_GATEWAY_MODEL";

const DEFAULT_API_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

/// Configuration for the upstream model used by the generation proxy
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// OpenAI-compatible chat completions URL
    pub api_url: String,

    /// Bearer token for the gateway. `None` fails every request with UnknownError.
    pub api_key: Option<String>,

    pub model: String,

    /// Transport timeout for the single upstream call
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            api_url: std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
            model: std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(60),
        }
    }
}

impl ProxyConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Which scenario store backend to wire in
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// Single JSON file, the local-persistence variant
    Local,
    /// SQLite database, the relational variant
    Sqlite,
}

/// Which alternative generator to wire in
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GeneratorKind {
    /// Template expander, no network
    Template,
    /// HTTP call to a running generation proxy
    Proxy,
    /// Generation pipeline run in-process against the upstream model
    Direct,
}

/// Default data directory: XDG data dir on Linux, Application Support on macOS
pub fn default_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("decision-journal")
}
