//! The journal: every user action on scenarios goes through here
//!
//! Holds the signed-in user's scenarios as a cached list, the collaborators
//! (store, generator, session) injected at construction, a busy flag for
//! generation-bearing actions and a broadcast channel announcing changes.
//!
//! Invariant checks (non-empty titles, at least one alternative) run against
//! the cache before any store call. The last-alternative check is therefore
//! only as fresh as the last `load`; two sessions deleting concurrently can
//! both pass it. Last write wins at the store.

use crate::error::{GenerationFailure, JournalError};
use crate::generator::AlternativeGenerator;
use crate::session::Session;
use crate::store::ScenarioStore;
use crate::types::{Alternative, Scenario, User, DEFAULT_ALTERNATIVE_COUNT};
use crate::validate::{validate_context, ContextPolicy};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

pub type JournalResult<T> = Result<T, JournalError>;

/// Change notifications for subscribers (UI refresh, logging)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEvent {
    Loaded { count: usize },
    Created { scenario_id: String },
    Updated { scenario_id: String },
    Deleted { scenario_id: String },
}

/// Fields of a scenario that may be edited after creation
#[derive(Debug, Clone, Default)]
pub struct ScenarioPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub struct Journal {
    store: Arc<dyn ScenarioStore>,
    generator: Arc<dyn AlternativeGenerator>,
    session: Arc<dyn Session>,
    scenarios: RwLock<Vec<Scenario>>,
    busy: AtomicBool,
    events: broadcast::Sender<JournalEvent>,
}

/// Clears the busy flag when the generation action ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Journal {
    pub fn new(
        store: Arc<dyn ScenarioStore>,
        generator: Arc<dyn AlternativeGenerator>,
        session: Arc<dyn Session>,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            store,
            generator,
            session,
            scenarios: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JournalEvent> {
        self.events.subscribe()
    }

    /// True while a create or regenerate is waiting on the generator
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Snapshot of the cached scenarios
    pub async fn scenarios(&self) -> Vec<Scenario> {
        self.scenarios.read().await.clone()
    }

    pub async fn scenario(&self, id: &str) -> Option<Scenario> {
        self.scenarios.read().await.iter().find(|s| s.id == id).cloned()
    }

    /// Refresh the cache from the store, most recently updated first.
    ///
    /// Store failures are logged and leave an empty list.
    pub async fn load(&self) -> usize {
        let scenarios = match self.session.current_user() {
            Some(user) => match self.store.list_by_owner(&user.id) {
                Ok(mut scenarios) => {
                    scenarios.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                    scenarios
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load scenarios");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let count = scenarios.len();
        *self.scenarios.write().await = scenarios;
        self.notify(JournalEvent::Loaded { count });
        count
    }

    /// Generate the first batch of alternatives and store the new scenario
    pub async fn create_scenario(
        &self,
        title: &str,
        description: &str,
        policy: ContextPolicy,
    ) -> JournalResult<Scenario> {
        let user = self.require_user()?;
        let title = title.trim();
        if title.is_empty() {
            return Err(JournalError::MissingTitle);
        }
        let description = description.trim();

        let check = validate_context(description);
        if !check.valid {
            let message = check.message.unwrap_or_default();
            match policy {
                ContextPolicy::Enforce => return Err(JournalError::InvalidContext(message)),
                ContextPolicy::Advisory => {
                    tracing::warn!(title, "generating with thin context");
                }
            }
        }

        let alternatives = {
            let _busy = self.begin_generation()?;
            self.generate(title, description).await?
        };

        let scenario = Scenario::new(&user.id, title, description, alternatives);
        self.store.upsert(&scenario)?;

        self.scenarios.write().await.insert(0, scenario.clone());
        tracing::info!(scenario = %scenario.id, alternatives = scenario.alternatives.len(), "scenario created");
        self.notify(JournalEvent::Created {
            scenario_id: scenario.id.clone(),
        });
        Ok(scenario)
    }

    pub async fn update_scenario(&self, id: &str, patch: ScenarioPatch) -> JournalResult<Scenario> {
        self.require_user()?;
        if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
            return Err(JournalError::MissingTitle);
        }

        let mut scenarios = self.scenarios.write().await;
        let cached = find_mut(&mut scenarios, id)?;

        let mut updated = cached.clone();
        if let Some(title) = patch.title {
            updated.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            updated.description = description.trim().to_string();
        }
        updated.touch(Utc::now());

        self.store.upsert(&updated)?;
        *cached = updated.clone();
        drop(scenarios);

        self.notify(JournalEvent::Updated {
            scenario_id: id.to_string(),
        });
        Ok(updated)
    }

    /// Remove a scenario and all of its alternatives
    pub async fn delete_scenario(&self, id: &str) -> JournalResult<()> {
        self.require_user()?;
        let mut scenarios = self.scenarios.write().await;
        find_mut(&mut scenarios, id)?;

        self.store.remove(id)?;
        scenarios.retain(|s| s.id != id);
        drop(scenarios);

        tracing::info!(scenario = %id, "scenario deleted");
        self.notify(JournalEvent::Deleted {
            scenario_id: id.to_string(),
        });
        Ok(())
    }

    pub async fn add_alternative(&self, scenario_id: &str, text: &str) -> JournalResult<Alternative> {
        self.require_user()?;
        let text = non_empty(text)?;

        let mut scenarios = self.scenarios.write().await;
        let scenario = find_mut(&mut scenarios, scenario_id)?;

        let alternative = Alternative::new(text);
        let now = Utc::now();
        self.store.insert_alternative(scenario_id, &alternative, now)?;
        scenario.alternatives.push(alternative.clone());
        scenario.touch(now);
        drop(scenarios);

        self.notify(JournalEvent::Updated {
            scenario_id: scenario_id.to_string(),
        });
        Ok(alternative)
    }

    /// Replace an alternative's text. Setting the current text still counts as an edit.
    pub async fn update_alternative(
        &self,
        scenario_id: &str,
        alternative_id: &str,
        text: &str,
    ) -> JournalResult<()> {
        self.require_user()?;
        let text = non_empty(text)?;

        let mut scenarios = self.scenarios.write().await;
        let scenario = find_mut(&mut scenarios, scenario_id)?;
        let index = alternative_index(scenario, alternative_id)?;

        let now = Utc::now();
        self.store
            .update_alternative(scenario_id, alternative_id, text, now)?;
        scenario.alternatives[index].text = text.to_string();
        scenario.touch(now);
        drop(scenarios);

        self.notify(JournalEvent::Updated {
            scenario_id: scenario_id.to_string(),
        });
        Ok(())
    }

    /// Remove one alternative; the last remaining one cannot be removed
    pub async fn delete_alternative(&self, scenario_id: &str, alternative_id: &str) -> JournalResult<()> {
        self.require_user()?;

        let mut scenarios = self.scenarios.write().await;
        let scenario = find_mut(&mut scenarios, scenario_id)?;
        let index = alternative_index(scenario, alternative_id)?;
        if scenario.alternatives.len() <= 1 {
            return Err(JournalError::LastAlternative);
        }

        let now = Utc::now();
        self.store
            .remove_alternative(scenario_id, alternative_id, now)?;
        scenario.alternatives.remove(index);
        scenario.touch(now);
        drop(scenarios);

        self.notify(JournalEvent::Updated {
            scenario_id: scenario_id.to_string(),
        });
        Ok(())
    }

    /// Generate a fresh batch and append it to the existing alternatives
    pub async fn regenerate_alternatives(&self, scenario_id: &str) -> JournalResult<Vec<Alternative>> {
        self.require_user()?;
        let scenario = self
            .scenario(scenario_id)
            .await
            .ok_or_else(|| JournalError::ScenarioNotFound(scenario_id.to_string()))?;

        let fresh = {
            let _busy = self.begin_generation()?;
            self.generate(&scenario.title, &scenario.description).await?
        };

        // re-read: the scenario may have been edited while we waited
        let mut scenarios = self.scenarios.write().await;
        let cached = find_mut(&mut scenarios, scenario_id)?;
        let mut updated = cached.clone();
        updated.alternatives.extend(fresh.iter().cloned());
        updated.touch(Utc::now());

        self.store.upsert(&updated)?;
        *cached = updated;
        drop(scenarios);

        tracing::info!(scenario = %scenario_id, added = fresh.len(), "alternatives regenerated");
        self.notify(JournalEvent::Updated {
            scenario_id: scenario_id.to_string(),
        });
        Ok(fresh)
    }

    fn require_user(&self) -> JournalResult<User> {
        self.session
            .current_user()
            .ok_or(JournalError::Unauthenticated)
    }

    fn begin_generation(&self) -> JournalResult<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| JournalError::Busy)?;
        Ok(BusyGuard(&self.busy))
    }

    async fn generate(&self, title: &str, description: &str) -> JournalResult<Vec<Alternative>> {
        let generated = self
            .generator
            .generate(title, description, DEFAULT_ALTERNATIVE_COUNT)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "alternative generation failed"))?;

        let alternatives: Vec<Alternative> = generated
            .into_iter()
            .filter(|g| !g.text.trim().is_empty())
            .take(DEFAULT_ALTERNATIVE_COUNT)
            .map(Alternative::from)
            .collect();

        if alternatives.is_empty() {
            return Err(GenerationFailure::new("No alternatives were generated").into());
        }
        Ok(alternatives)
    }

    fn notify(&self, event: JournalEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

fn find_mut<'a>(scenarios: &'a mut [Scenario], id: &str) -> JournalResult<&'a mut Scenario> {
    scenarios
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| JournalError::ScenarioNotFound(id.to_string()))
}

fn alternative_index(scenario: &Scenario, alternative_id: &str) -> JournalResult<usize> {
    scenario
        .alternatives
        .iter()
        .position(|a| a.id == alternative_id)
        .ok_or_else(|| JournalError::AlternativeNotFound(alternative_id.to_string()))
}

fn non_empty(text: &str) -> JournalResult<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(JournalError::EmptyAlternative);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::TemplateGenerator;
    use crate::session::StaticSession;
    use crate::store::SqliteStore;
    use crate::types::GeneratedAlternative;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    const CONTEXT: &str = "Equipe de 3, prazo curto.";

    fn user() -> User {
        User {
            id: "user-1".to_string(),
            email: "ana@example.com".to_string(),
        }
    }

    fn journal_with(generator: Arc<dyn AlternativeGenerator>) -> (Journal, Arc<SqliteStore>) {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let journal = Journal::new(
            store.clone(),
            generator,
            Arc::new(StaticSession::signed_in(user())),
        );
        (journal, store)
    }

    fn journal() -> (Journal, Arc<SqliteStore>) {
        journal_with(Arc::new(TemplateGenerator::new()))
    }

    struct FailingGenerator;

    #[async_trait]
    impl AlternativeGenerator for FailingGenerator {
        async fn generate(
            &self,
            _title: &str,
            _description: &str,
            _count: usize,
        ) -> Result<Vec<GeneratedAlternative>, GenerationFailure> {
            Err(GenerationFailure::new("Rate limit exceeded"))
        }
    }

    /// Blocks until released, to observe the busy flag
    struct GatedGenerator {
        gate: Notify,
    }

    #[async_trait]
    impl AlternativeGenerator for GatedGenerator {
        async fn generate(
            &self,
            title: &str,
            _description: &str,
            count: usize,
        ) -> Result<Vec<GeneratedAlternative>, GenerationFailure> {
            self.gate.notified().await;
            Ok(TemplateGenerator::expand(title, count)
                .into_iter()
                .map(|text| GeneratedAlternative { text })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_create_end_to_end() {
        let (journal, store) = journal();
        assert_eq!(CONTEXT.chars().count(), 25);

        let scenario = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap();

        assert_eq!(scenario.alternatives.len(), 3);
        assert!(scenario.alternatives.iter().all(|a| !a.text.trim().is_empty()));
        assert!(scenario.updated_at >= scenario.created_at);
        assert_eq!(scenario.owner_id, "user-1");
        assert_eq!(store.get(&scenario.id).unwrap(), Some(scenario.clone()));
        assert_eq!(journal.scenarios().await, vec![scenario]);
    }

    #[tokio::test]
    async fn test_create_requires_user_and_title() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let anonymous = Journal::new(
            store,
            Arc::new(TemplateGenerator::new()),
            Arc::new(StaticSession::anonymous()),
        );
        let err = anonymous
            .create_scenario("T", CONTEXT, ContextPolicy::Advisory)
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Unauthenticated));

        let (journal, _) = journal();
        let err = journal
            .create_scenario("   ", CONTEXT, ContextPolicy::Advisory)
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::MissingTitle));
    }

    #[tokio::test]
    async fn test_context_policy() {
        let (journal, store) = journal();

        let err = journal
            .create_scenario("Escolher stack", "short", ContextPolicy::Enforce)
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::InvalidContext(_)));
        assert!(store.list_by_owner("user-1").unwrap().is_empty());

        let scenario = journal
            .create_scenario("Escolher stack", "", ContextPolicy::Advisory)
            .await
            .unwrap();
        assert_eq!(scenario.alternatives.len(), 3);
    }

    #[tokio::test]
    async fn test_generation_failure_aborts_creation() {
        let (journal, store) = journal_with(Arc::new(FailingGenerator));

        let err = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap_err();

        match err {
            JournalError::Generation(failure) => assert_eq!(failure.message, "Rate limit exceeded"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.list_by_owner("user-1").unwrap().is_empty());
        assert!(!journal.is_busy());
    }

    #[tokio::test]
    async fn test_sole_alternative_cannot_be_deleted() {
        let (journal, store) = journal();
        let scenario = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap();

        let ids: Vec<String> = scenario.alternatives.iter().map(|a| a.id.clone()).collect();
        journal.delete_alternative(&scenario.id, &ids[0]).await.unwrap();
        journal.delete_alternative(&scenario.id, &ids[1]).await.unwrap();

        let before = journal.scenario(&scenario.id).await.unwrap();
        assert_eq!(before.alternatives.len(), 1);

        let err = journal
            .delete_alternative(&scenario.id, &ids[2])
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::LastAlternative));
        assert_eq!(journal.scenario(&scenario.id).await.unwrap(), before);
        assert_eq!(store.get(&scenario.id).unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_one_of_two_leaves_one() {
        let (journal, _) = journal();
        let scenario = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap();
        let third = scenario.alternatives[2].id.clone();
        journal.delete_alternative(&scenario.id, &third).await.unwrap();

        let two = journal.scenario(&scenario.id).await.unwrap();
        assert_eq!(two.alternatives.len(), 2);

        journal
            .delete_alternative(&scenario.id, &two.alternatives[0].id)
            .await
            .unwrap();
        let one = journal.scenario(&scenario.id).await.unwrap();
        assert_eq!(one.alternatives.len(), 1);
        assert_eq!(one.alternatives[0].id, two.alternatives[1].id);
    }

    #[tokio::test]
    async fn test_edit_to_same_text_touches_parent_only() {
        let (journal, store) = journal();
        let scenario = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap();
        let target = scenario.alternatives[1].clone();

        tokio::time::sleep(Duration::from_millis(5)).await;
        journal
            .update_alternative(&scenario.id, &target.id, &target.text)
            .await
            .unwrap();

        let after = journal.scenario(&scenario.id).await.unwrap();
        assert!(after.updated_at > scenario.updated_at);
        assert_eq!(after.alternatives, scenario.alternatives);
        assert_eq!(store.get(&scenario.id).unwrap().unwrap(), after);
    }

    #[tokio::test]
    async fn test_add_and_edit_alternative() {
        let (journal, store) = journal();
        let scenario = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap();

        let added = journal
            .add_alternative(&scenario.id, "  Use Phoenix LiveView ")
            .await
            .unwrap();
        assert_eq!(added.text, "Use Phoenix LiveView");

        journal
            .update_alternative(&scenario.id, &added.id, "Use Rails")
            .await
            .unwrap();
        let stored = store.get(&scenario.id).unwrap().unwrap();
        assert_eq!(stored.alternatives.len(), 4);
        assert_eq!(stored.alternatives[3].text, "Use Rails");
        assert_eq!(journal.scenario(&scenario.id).await.unwrap(), stored);

        let err = journal.add_alternative(&scenario.id, "  ").await.unwrap_err();
        assert!(matches!(err, JournalError::EmptyAlternative));
        let err = journal
            .update_alternative(&scenario.id, "missing", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::AlternativeNotFound(_)));
    }

    #[tokio::test]
    async fn test_regenerate_appends() {
        let (journal, store) = journal();
        let scenario = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap();

        let fresh = journal.regenerate_alternatives(&scenario.id).await.unwrap();
        assert_eq!(fresh.len(), 3);

        let stored = store.get(&scenario.id).unwrap().unwrap();
        assert_eq!(stored.alternatives.len(), 6);
        assert_eq!(stored.alternatives[..3], scenario.alternatives[..]);
        assert_eq!(stored.alternatives[3..], fresh[..]);
    }

    #[tokio::test]
    async fn test_update_and_delete_scenario() {
        let (journal, store) = journal();
        let scenario = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap();

        let err = journal
            .update_scenario(
                &scenario.id,
                ScenarioPatch {
                    title: Some(" ".into()),
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::MissingTitle));

        let updated = journal
            .update_scenario(
                &scenario.id,
                ScenarioPatch {
                    title: Some("Escolher stack do backend".into()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, CONTEXT);
        assert_eq!(store.get(&scenario.id).unwrap().unwrap().title, "Escolher stack do backend");

        journal.delete_scenario(&scenario.id).await.unwrap();
        assert!(store.get(&scenario.id).unwrap().is_none());
        assert!(journal.scenarios().await.is_empty());
        assert!(matches!(
            journal.delete_scenario(&scenario.id).await.unwrap_err(),
            JournalError::ScenarioNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_second_generation_is_rejected_while_busy() {
        let generator = Arc::new(GatedGenerator { gate: Notify::new() });
        let (journal, _) = journal_with(generator.clone());
        let journal = Arc::new(journal);

        let first = {
            let journal = journal.clone();
            tokio::spawn(async move {
                journal
                    .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
                    .await
            })
        };

        while !journal.is_busy() {
            tokio::task::yield_now().await;
        }

        let err = journal
            .create_scenario("Another", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Busy));

        generator.gate.notify_one();
        let created = first.await.unwrap().unwrap();
        assert_eq!(created.alternatives.len(), 3);
        assert!(!journal.is_busy());
    }

    #[tokio::test]
    async fn test_load_sorts_and_notifies() {
        let (journal, store) = journal();
        let mut events = journal.subscribe();

        let older = Scenario::new("user-1", "Older", "", vec![Alternative::new("A")]);
        let mut newer = Scenario::new("user-1", "Newer", "", vec![Alternative::new("B")]);
        newer.touch(older.updated_at + chrono::Duration::seconds(60));
        store.upsert(&older).unwrap();
        store.upsert(&newer).unwrap();
        store
            .upsert(&Scenario::new("someone-else", "X", "", vec![Alternative::new("C")]))
            .unwrap();

        assert_eq!(journal.load().await, 2);
        let titles: Vec<String> = journal.scenarios().await.into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
        assert_eq!(events.recv().await.unwrap(), JournalEvent::Loaded { count: 2 });
    }

    struct BrokenStore;

    impl ScenarioStore for BrokenStore {
        fn list_by_owner(&self, _: &str) -> anyhow::Result<Vec<Scenario>> {
            anyhow::bail!("disk on fire")
        }
        fn get(&self, _: &str) -> anyhow::Result<Option<Scenario>> {
            anyhow::bail!("disk on fire")
        }
        fn upsert(&self, _: &Scenario) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        fn remove(&self, _: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        fn insert_alternative(&self, _: &str, _: &Alternative, _: chrono::DateTime<Utc>) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        fn update_alternative(&self, _: &str, _: &str, _: &str, _: chrono::DateTime<Utc>) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        fn remove_alternative(&self, _: &str, _: &str, _: chrono::DateTime<Utc>) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    #[tokio::test]
    async fn test_store_failures() {
        let journal = Journal::new(
            Arc::new(BrokenStore),
            Arc::new(TemplateGenerator::new()),
            Arc::new(StaticSession::signed_in(user())),
        );

        // loading degrades to an empty list
        assert_eq!(journal.load().await, 0);

        // writes pass the store error through
        let err = journal
            .create_scenario("Escolher stack", CONTEXT, ContextPolicy::Enforce)
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Store(_)));
        assert!(journal.scenarios().await.is_empty());
    }
}
