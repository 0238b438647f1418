//! Scenario persistence
//!
//! One interface, two backends chosen at composition time:
//! - [`LocalStore`]: every scenario in a single JSON file
//! - [`SqliteStore`]: `scenarios` + `alternatives` tables with cascading delete
//!
//! Alternative mutations take the parent's new `updated_at` so both changes
//! land together; readers never observe one without the other.

pub mod local;
pub mod sqlite;

pub use local::LocalStore;
pub use sqlite::SqliteStore;

use crate::config::StorageBackend;
use crate::types::{Alternative, Scenario};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

pub trait ScenarioStore: Send + Sync {
    /// Scenarios owned by `owner_id`, most recently updated first
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Scenario>>;

    fn get(&self, id: &str) -> Result<Option<Scenario>>;

    /// Insert or replace a scenario together with its alternative list
    fn upsert(&self, scenario: &Scenario) -> Result<()>;

    /// Delete a scenario and all of its alternatives. Unknown ids are a no-op.
    fn remove(&self, id: &str) -> Result<()>;

    fn insert_alternative(
        &self,
        scenario_id: &str,
        alternative: &Alternative,
        touched_at: DateTime<Utc>,
    ) -> Result<()>;

    fn update_alternative(
        &self,
        scenario_id: &str,
        alternative_id: &str,
        text: &str,
        touched_at: DateTime<Utc>,
    ) -> Result<()>;

    fn remove_alternative(
        &self,
        scenario_id: &str,
        alternative_id: &str,
        touched_at: DateTime<Utc>,
    ) -> Result<()>;
}

/// Open the configured backend under `data_dir`
pub fn open(backend: StorageBackend, data_dir: &Path) -> Result<Arc<dyn ScenarioStore>> {
    std::fs::create_dir_all(data_dir)?;
    let store: Arc<dyn ScenarioStore> = match backend {
        StorageBackend::Local => Arc::new(LocalStore::new(data_dir.join("scenarios.json"))),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&data_dir.join("journal.db"))?),
    };
    tracing::debug!(?backend, dir = ?data_dir, "scenario store opened");
    Ok(store)
}

/// Behaviour every backend must share
#[cfg(test)]
pub(crate) fn exercise_store(store: &dyn ScenarioStore) {
    use chrono::Duration;

    let mut scenario = Scenario::new(
        "owner-1",
        "Escolher stack",
        "Small team, tight deadline",
        vec![Alternative::new("Rust"), Alternative::new("Go")],
    );
    store.upsert(&scenario).unwrap();
    store
        .upsert(&Scenario::new("owner-2", "Other", "", vec![Alternative::new("X")]))
        .unwrap();

    // ownership filter and round trip
    let listed = store.list_by_owner("owner-1").unwrap();
    assert_eq!(listed, vec![scenario.clone()]);
    assert!(store.list_by_owner("nobody").unwrap().is_empty());

    // alternative insert keeps order and touches the parent
    let third = Alternative::new("Elixir");
    let t1 = scenario.created_at + Duration::seconds(1);
    store.insert_alternative(&scenario.id, &third, t1).unwrap();
    let loaded = store.get(&scenario.id).unwrap().unwrap();
    let texts: Vec<_> = loaded.alternatives.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["Rust", "Go", "Elixir"]);
    assert_eq!(loaded.updated_at, t1);

    // edit
    let t2 = t1 + Duration::seconds(1);
    store
        .update_alternative(&scenario.id, &third.id, "Elixir + Phoenix", t2)
        .unwrap();
    let loaded = store.get(&scenario.id).unwrap().unwrap();
    assert_eq!(loaded.alternatives[2].text, "Elixir + Phoenix");
    assert_eq!(loaded.updated_at, t2);

    // remove one
    let t3 = t2 + Duration::seconds(1);
    let go_id = scenario.alternatives[1].id.clone();
    store.remove_alternative(&scenario.id, &go_id, t3).unwrap();
    let loaded = store.get(&scenario.id).unwrap().unwrap();
    assert_eq!(loaded.alternatives.len(), 2);
    assert!(loaded.alternative(&go_id).is_none());
    assert_eq!(loaded.updated_at, t3);

    // mutations on unknown rows fail
    assert!(store
        .insert_alternative("missing", &Alternative::new("Z"), t3)
        .is_err());
    assert!(store
        .update_alternative(&scenario.id, "missing", "Z", t3)
        .is_err());

    // upsert replaces fields and list
    scenario.title = "Escolher stack backend".to_string();
    scenario.alternatives.truncate(1);
    scenario.touch(t3 + Duration::seconds(1));
    store.upsert(&scenario).unwrap();
    assert_eq!(store.get(&scenario.id).unwrap().unwrap(), scenario);

    // most recently updated first
    let mut newer = Scenario::new("owner-1", "Newer", "", vec![Alternative::new("N")]);
    newer.touch(scenario.updated_at + Duration::seconds(10));
    store.upsert(&newer).unwrap();
    let ids: Vec<_> = store
        .list_by_owner("owner-1")
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![newer.id.clone(), scenario.id.clone()]);

    // delete
    store.remove(&scenario.id).unwrap();
    assert!(store.get(&scenario.id).unwrap().is_none());
    store.remove("missing").unwrap();
    assert_eq!(store.list_by_owner("owner-2").unwrap().len(), 1);
}
