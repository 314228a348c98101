//! SQLite results sink.
//!
//! RULE: Only store.rs talks to the database.
//! Behaviors never touch the store; the engine persists what they return.
//!
//! This is a per-run record of what happened, not resumable state.

use crate::{
    collector::ModelSample,
    error::SimResult,
    event::EventLogEntry,
    types::Step,
};
use rusqlite::{params, Connection};

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    /// Open (or create) the results database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply the schema. Idempotent.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(&self, run_id: &str, seed: u64, version: &str, started_at: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, seed, version, started_at) VALUES (?1, ?2, ?3, ?4)",
            params![run_id, seed as i64, version, started_at],
        )?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, step, agent_id, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.run_id,
                entry.step as i64,
                entry.agent_id,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    /// Append a batch of entries in one transaction.
    pub fn append_events(&mut self, entries: &[EventLogEntry]) -> SimResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO event_log (run_id, step, agent_id, event_type, payload)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.run_id,
                    entry.step as i64,
                    entry.agent_id,
                    entry.event_type,
                    entry.payload,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn events_for_step(&self, run_id: &str, step: Step) -> SimResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, step, agent_id, event_type, payload
             FROM event_log WHERE run_id = ?1 AND step = ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![run_id, step as i64], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    run_id:     row.get(1)?,
                    step:       row.get::<_, i64>(2)? as u64,
                    agent_id:   row.get(3)?,
                    event_type: row.get(4)?,
                    payload:    row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, run_id: &str, event_type: &str) -> SimResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE run_id = ?1 AND event_type = ?2",
            params![run_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    // ── Step summaries ─────────────────────────────────────────

    pub fn insert_step_summary(&self, run_id: &str, sample: &ModelSample) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO step_summary
                (run_id, step, employed, unemployed, open_vacancies, resolution_misses)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                run_id,
                sample.step as i64,
                sample.employed as i64,
                sample.unemployed as i64,
                sample.open_vacancies as i64,
                sample.resolution_misses as i64,
            ],
        )?;
        Ok(())
    }

    pub fn step_summaries(&self, run_id: &str) -> SimResult<Vec<ModelSample>> {
        let mut stmt = self.conn.prepare(
            "SELECT step, employed, unemployed, open_vacancies, resolution_misses
             FROM step_summary WHERE run_id = ?1
             ORDER BY step ASC",
        )?;
        let samples = stmt
            .query_map(params![run_id], |row| {
                Ok(ModelSample {
                    step:              row.get::<_, i64>(0)? as u64,
                    employed:          row.get::<_, i64>(1)? as usize,
                    unemployed:        row.get::<_, i64>(2)? as usize,
                    open_vacancies:    row.get::<_, i64>(3)? as usize,
                    resolution_misses: row.get::<_, i64>(4)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(samples)
    }
}
