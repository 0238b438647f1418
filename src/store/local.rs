//! JSON-file scenario store
//!
//! Single file, zero network dependencies, works offline. The whole list is
//! rewritten on every mutation via a temp file + rename.

use super::ScenarioStore;
use crate::types::{Alternative, Scenario};
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct LocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Scenario>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read scenarios from {:?}", self.path))?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data)
            .with_context(|| format!("Corrupt scenario file at {:?}", self.path))
    }

    fn write_all(&self, scenarios: &[Scenario]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(scenarios)?)
            .with_context(|| format!("Failed to write scenarios to {:?}", tmp))?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under the store lock
    fn modify<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Scenario>) -> Result<()>,
    {
        let _guard = self.lock.lock().map_err(|_| anyhow!("scenario store lock poisoned"))?;
        let mut scenarios = self.read_all()?;
        change(&mut scenarios)?;
        self.write_all(&scenarios)
    }

    fn read(&self) -> Result<Vec<Scenario>> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("scenario store lock poisoned"))?;
        self.read_all()
    }
}

fn find_mut<'a>(scenarios: &'a mut [Scenario], id: &str) -> Result<&'a mut Scenario> {
    scenarios
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow!("scenario not found: {}", id))
}

impl ScenarioStore for LocalStore {
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Scenario>> {
        let mut owned: Vec<Scenario> = self
            .read()?
            .into_iter()
            .filter(|s| s.owner_id == owner_id)
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }

    fn get(&self, id: &str) -> Result<Option<Scenario>> {
        Ok(self.read()?.into_iter().find(|s| s.id == id))
    }

    fn upsert(&self, scenario: &Scenario) -> Result<()> {
        self.modify(|scenarios| {
            match scenarios.iter_mut().find(|s| s.id == scenario.id) {
                Some(existing) => *existing = scenario.clone(),
                None => scenarios.push(scenario.clone()),
            }
            Ok(())
        })
    }

    fn remove(&self, id: &str) -> Result<()> {
        self.modify(|scenarios| {
            scenarios.retain(|s| s.id != id);
            Ok(())
        })
    }

    fn insert_alternative(
        &self,
        scenario_id: &str,
        alternative: &Alternative,
        touched_at: DateTime<Utc>,
    ) -> Result<()> {
        self.modify(|scenarios| {
            let scenario = find_mut(scenarios, scenario_id)?;
            scenario.alternatives.push(alternative.clone());
            scenario.touch(touched_at);
            Ok(())
        })
    }

    fn update_alternative(
        &self,
        scenario_id: &str,
        alternative_id: &str,
        text: &str,
        touched_at: DateTime<Utc>,
    ) -> Result<()> {
        self.modify(|scenarios| {
            let scenario = find_mut(scenarios, scenario_id)?;
            let Some(alternative) = scenario
                .alternatives
                .iter_mut()
                .find(|a| a.id == alternative_id)
            else {
                bail!("alternative not found: {}", alternative_id);
            };
            alternative.text = text.to_string();
            scenario.touch(touched_at);
            Ok(())
        })
    }

    fn remove_alternative(
        &self,
        scenario_id: &str,
        alternative_id: &str,
        touched_at: DateTime<Utc>,
    ) -> Result<()> {
        self.modify(|scenarios| {
            let scenario = find_mut(scenarios, scenario_id)?;
            let before = scenario.alternatives.len();
            scenario.alternatives.retain(|a| a.id != alternative_id);
            if scenario.alternatives.len() == before {
                bail!("alternative not found: {}", alternative_id);
            }
            scenario.touch(touched_at);
            Ok(())
        })
    }
}
