//! Core types for the decision journal
//!
//! A scenario is one decision the user is weighing; its alternatives are the
//! concrete options on the table. Everything here is plain data - mutation
//! rules live in [`crate::journal`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of alternatives produced when a scenario is created or regenerated
pub const DEFAULT_ALTERNATIVE_COUNT: usize = 3;

/// An identity handed to us by the session collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// One concrete option attached to a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Alternative {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A decision record with its candidate options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Insertion order
    pub alternatives: Vec<Alternative>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    /// Create a scenario owned by `owner_id` with its first batch of alternatives
    pub fn new(
        owner_id: &str,
        title: &str,
        description: &str,
        alternatives: Vec<Alternative>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            alternatives,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn alternative(&self, alternative_id: &str) -> Option<&Alternative> {
        self.alternatives.iter().find(|a| a.id == alternative_id)
    }

    /// Refresh `updated_at`, never moving it before `created_at`
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at.max(self.created_at);
    }
}

/// Ephemeral request for a batch of alternatives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub count: usize,
}

impl GenerationRequest {
    pub fn new(title: &str, description: &str, count: usize) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            count: if count == 0 { DEFAULT_ALTERNATIVE_COUNT } else { count },
        }
    }
}

/// A freshly generated option, not yet attached to a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAlternative {
    pub text: String,
}

impl From<GeneratedAlternative> for Alternative {
    fn from(generated: GeneratedAlternative) -> Self {
        Alternative::new(generated.text)
    }
}
