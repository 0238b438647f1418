//! SQLite scenario store
//!
//! Mirrors the hosted relational layout: `scenarios` and `alternatives`,
//! alternatives cascading with their scenario. Alternative order is rowid
//! order, so `upsert` rewrites the list in sequence.

use super::ScenarioStore;
use crate::types::{Alternative, Scenario};
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS scenarios (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scenarios_user ON scenarios(user_id, updated_at);

CREATE TABLE IF NOT EXISTS alternatives (
    id TEXT PRIMARY KEY,
    scenario_id TEXT NOT NULL REFERENCES scenarios(id) ON DELETE CASCADE,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_alternatives_scenario ON alternatives(scenario_id);
"#;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database with schema
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {:?}", path))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }

    fn load_scenarios(conn: &Connection, rows: Vec<ScenarioRow>) -> Result<Vec<Scenario>> {
        let mut stmt = conn.prepare(
            "SELECT id, content, created_at FROM alternatives WHERE scenario_id = ?1 ORDER BY rowid",
        )?;

        let mut scenarios = Vec::with_capacity(rows.len());
        for row in rows {
            let alternatives = stmt
                .query_map([&row.id], |r| {
                    Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?, r.get::<_, String>(2)?))
                })?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|(id, text, created_at)| {
                    Ok(Alternative {
                        id,
                        text,
                        created_at: parse_timestamp(&created_at)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            scenarios.push(Scenario {
                created_at: parse_timestamp(&row.created_at)?,
                updated_at: parse_timestamp(&row.updated_at)?,
                id: row.id,
                owner_id: row.user_id,
                title: row.title,
                description: row.description.unwrap_or_default(),
                alternatives,
            });
        }
        Ok(scenarios)
    }
}

struct ScenarioRow {
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

const SCENARIO_COLUMNS: &str = "id, user_id, title, description, created_at, updated_at";

fn scenario_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScenarioRow> {
    Ok(ScenarioRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Fixed-width RFC 3339 so text ordering matches time ordering
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid timestamp in database: {}", raw))?
        .with_timezone(&Utc))
}

fn touch(conn: &Connection, scenario_id: &str, at: DateTime<Utc>) -> Result<()> {
    // never earlier than created_at; timestamps are fixed-width so MAX on text works
    let updated = conn.execute(
        "UPDATE scenarios SET updated_at = MAX(created_at, ?2) WHERE id = ?1",
        params![scenario_id, format_timestamp(at)],
    )?;
    if updated == 0 {
        bail!("scenario not found: {}", scenario_id);
    }
    Ok(())
}

impl ScenarioStore for SqliteStore {
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Scenario>> {
        let conn = self.conn()?;
        let rows = conn
            .prepare(&format!(
                "SELECT {} FROM scenarios WHERE user_id = ?1 ORDER BY updated_at DESC",
                SCENARIO_COLUMNS
            ))?
            .query_map([owner_id], scenario_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Self::load_scenarios(&conn, rows)
    }

    fn get(&self, id: &str) -> Result<Option<Scenario>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM scenarios WHERE id = ?1", SCENARIO_COLUMNS),
                [id],
                scenario_row,
            )
            .optional()?;
        match row {
            Some(row) => Ok(Self::load_scenarios(&conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn upsert(&self, scenario: &Scenario) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO scenarios (id, user_id, title, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                title = excluded.title,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
            params![
                scenario.id,
                scenario.owner_id,
                scenario.title,
                scenario.description,
                format_timestamp(scenario.created_at),
                format_timestamp(scenario.updated_at),
            ],
        )?;

        tx.execute(
            "DELETE FROM alternatives WHERE scenario_id = ?1",
            [&scenario.id],
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO alternatives (id, scenario_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for alternative in &scenario.alternatives {
                insert.execute(params![
                    alternative.id,
                    scenario.id,
                    alternative.text,
                    format_timestamp(alternative.created_at),
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM scenarios WHERE id = ?1", [id])?;
        Ok(())
    }

    fn insert_alternative(
        &self,
        scenario_id: &str,
        alternative: &Alternative,
        touched_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        touch(&tx, scenario_id, touched_at)?;
        tx.execute(
            "INSERT INTO alternatives (id, scenario_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                alternative.id,
                scenario_id,
                alternative.text,
                format_timestamp(alternative.created_at),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn update_alternative(
        &self,
        scenario_id: &str,
        alternative_id: &str,
        text: &str,
        touched_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let updated = tx.execute(
            "UPDATE alternatives SET content = ?3 WHERE id = ?1 AND scenario_id = ?2",
            params![alternative_id, scenario_id, text],
        )?;
        if updated == 0 {
            bail!("alternative not found: {}", alternative_id);
        }
        touch(&tx, scenario_id, touched_at)?;
        tx.commit()?;
        Ok(())
    }

    fn remove_alternative(
        &self,
        scenario_id: &str,
        alternative_id: &str,
        touched_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute(
            "DELETE FROM alternatives WHERE id = ?1 AND scenario_id = ?2",
            params![alternative_id, scenario_id],
        )?;
        if deleted == 0 {
            bail!("alternative not found: {}", alternative_id);
        }
        touch(&tx, scenario_id, touched_at)?;
        tx.commit()?;
        Ok(())
    }
}
