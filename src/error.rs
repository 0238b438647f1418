//! Error taxonomies
//!
//! The proxy taxonomy is part of the wire contract: each kind maps to a fixed
//! HTTP status and is reported to clients as `{"error": "<message>"}`.

use thiserror::Error;

/// Failures of the server-side generation pipeline
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Rate limit exceeded. Try again in a few seconds.")]
    RateLimited,

    #[error("Insufficient credits. Add credits to your account.")]
    InsufficientCredits,

    /// Upstream answered with a non-2xx status other than 429/402
    #[error("Failed to generate alternatives")]
    UpstreamError { status: u16 },

    #[error("Empty response from the model")]
    EmptyResponse,

    #[error("Could not generate alternatives")]
    NoAlternativesProduced,

    #[error("{0}")]
    Unknown(String),
}

impl ProxyError {
    /// HTTP status reported to the caller
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MissingTitle => 400,
            ProxyError::RateLimited => 429,
            ProxyError::InsufficientCredits => 402,
            ProxyError::UpstreamError { .. }
            | ProxyError::EmptyResponse
            | ProxyError::NoAlternativesProduced
            | ProxyError::Unknown(_) => 500,
        }
    }

    /// Stable machine-readable name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MissingTitle => "missing_title",
            ProxyError::RateLimited => "rate_limited",
            ProxyError::InsufficientCredits => "insufficient_credits",
            ProxyError::UpstreamError { .. } => "upstream_error",
            ProxyError::EmptyResponse => "empty_response",
            ProxyError::NoAlternativesProduced => "no_alternatives_produced",
            ProxyError::Unknown(_) => "unknown_error",
        }
    }

    pub fn unknown(message: impl std::fmt::Display) -> Self {
        ProxyError::Unknown(message.to_string())
    }
}

/// Client-facing generation failure carrying a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationFailure {
    pub message: String,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ProxyError> for GenerationFailure {
    fn from(err: ProxyError) -> Self {
        GenerationFailure::new(err.to_string())
    }
}

/// Failures of journal actions (create, edit, delete, regenerate)
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("title must not be empty")]
    MissingTitle,

    #[error("alternative text must not be empty")]
    EmptyAlternative,

    #[error("{0}")]
    InvalidContext(String),

    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("alternative not found: {0}")]
    AlternativeNotFound(String),

    #[error("a scenario must keep at least one alternative")]
    LastAlternative,

    #[error("another generation is already in progress")]
    Busy,

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationFailure),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(ProxyError::MissingTitle.status_code(), 400);
        assert_eq!(ProxyError::RateLimited.status_code(), 429);
        assert_eq!(ProxyError::InsufficientCredits.status_code(), 402);
        assert_eq!(ProxyError::UpstreamError { status: 503 }.status_code(), 500);
        assert_eq!(ProxyError::EmptyResponse.status_code(), 500);
        assert_eq!(ProxyError::NoAlternativesProduced.status_code(), 500);
        assert_eq!(ProxyError::unknown("boom").status_code(), 500);
    }

    #[test]
    fn test_generation_failure_keeps_proxy_message() {
        let failure: GenerationFailure = ProxyError::RateLimited.into();
        assert_eq!(failure.message, ProxyError::RateLimited.to_string());
    }
}
