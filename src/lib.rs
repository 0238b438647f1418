//! decision-journal - Concrete alternatives for the decisions you are weighing
//!
//! Record a decision as a *scenario*, describe its context, and get a short
//! list of concrete *alternatives* back from a language model (or a local
//! template expander when offline). Alternatives stay editable: add your own,
//! rewrite them, prune them, or regenerate a fresh batch.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use decision_journal::{Journal, ContextPolicy, SqliteStore, StaticSession, TemplateGenerator};
//!
//! let journal = Journal::new(
//!     Arc::new(SqliteStore::open(&db_path)?),
//!     Arc::new(TemplateGenerator::new()),
//!     Arc::new(StaticSession::signed_in(user)),
//! );
//! journal.load().await;
//!
//! let scenario = journal
//!     .create_scenario("Escolher stack", "Equipe pequena, prazo curto", ContextPolicy::Enforce)
//!     .await?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                     CLI (main.rs)                     │
//! └──────────────────────────┬────────────────────────────┘
//!                            │ validate → Journal
//!                            ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  Journal: cached scenarios, busy flag, change events  │
//! └──────┬───────────────────┬───────────────────┬────────┘
//!        │                   │                   │
//!   ScenarioStore   AlternativeGenerator      Session
//!   (json | sqlite) (template | proxy | direct)
//!                            │ HTTP
//!                            ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  Generation proxy: POST /generate-alternatives        │
//! │  prompt → upstream model → parse fallback chain       │
//! └───────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod journal;
pub mod proxy;
pub mod session;
pub mod store;
pub mod types;
pub mod validate;

// Core types
pub use types::*;
pub use error::{GenerationFailure, JournalError, ProxyError};

// State
pub use journal::{Journal, JournalEvent, ScenarioPatch};
pub use validate::{validate_context, ContextCheck, ContextPolicy, MIN_CONTEXT_CHARS};

// Collaborators
pub use generator::{AlternativeGenerator, ProxyClient, TemplateGenerator};
pub use session::{LocalSession, Session, StaticSession};
pub use store::{LocalStore, ScenarioStore, SqliteStore};

// Generation proxy (server side)
pub use proxy::upstream::{ChatModel, HttpChatModel};
pub use proxy::GenerationProxy;
pub use config::{ProxyConfig, StorageBackend, GeneratorKind};
