//! Context validation
//!
//! A soft gate in front of generation: thin context produces generic
//! alternatives, so we tell the user what to add. Callers decide whether an
//! invalid result blocks the action.

use serde::{Deserialize, Serialize};

/// Minimum trimmed length, in characters
pub const MIN_CONTEXT_CHARS: usize = 20;

pub const THIN_CONTEXT_MESSAGE: &str = "Describe the context of your decision in more detail \
(at least 20 characters). Include factors such as objectives, constraints, preferences \
and the criteria that matter to you.";

/// Outcome of [`validate_context`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What to do when the context check fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextPolicy {
    /// Refuse to generate
    Enforce,
    /// Log a warning and generate anyway (title-only path)
    #[default]
    Advisory,
}

pub fn validate_context(description: &str) -> ContextCheck {
    if description.trim().chars().count() < MIN_CONTEXT_CHARS {
        return ContextCheck {
            valid: false,
            message: Some(THIN_CONTEXT_MESSAGE.to_string()),
        };
    }
    ContextCheck {
        valid: true,
        message: None,
    }
}
