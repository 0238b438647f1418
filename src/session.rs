//! Session / identity
//!
//! The journal only needs "who is signed in". [`LocalSession`] keeps the
//! signed-in user in the data directory and remembers the id issued to each
//! email so signing in again finds the same scenarios.

use crate::types::User;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub trait Session: Send + Sync {
    fn current_user(&self) -> Option<User>;
}

/// A fixed identity, for servers and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user: Option<User>,
}

impl StaticSession {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl Session for StaticSession {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Accounts {
    /// email -> user id
    ids: BTreeMap<String, String>,
}

/// File-backed session under the data directory
pub struct LocalSession {
    user_path: PathBuf,
    accounts_path: PathBuf,
}

impl LocalSession {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            user_path: data_dir.join("user.json"),
            accounts_path: data_dir.join("accounts.json"),
        }
    }

    pub fn sign_in(&self, email: &str) -> Result<User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            bail!("invalid email address: {:?}", email);
        }

        let mut accounts: Accounts = read_json(&self.accounts_path)?.unwrap_or_default();
        let id = accounts
            .ids
            .entry(email.clone())
            .or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        write_json(&self.accounts_path, &accounts)?;

        let user = User { id, email };
        write_json(&self.user_path, &user)?;
        tracing::info!(user = %user.email, "signed in");
        Ok(user)
    }

    pub fn sign_out(&self) -> Result<()> {
        if self.user_path.exists() {
            fs::remove_file(&self.user_path)
                .with_context(|| format!("Failed to remove {:?}", self.user_path))?;
        }
        Ok(())
    }
}

impl Session for LocalSession {
    fn current_user(&self) -> Option<User> {
        match read_json(&self.user_path) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "could not read session, treating as signed out");
                None
            }
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(Some(
        serde_json::from_str(&data).with_context(|| format!("Corrupt JSON in {:?}", path))?,
    ))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
