//! Shared fixtures for progress engine integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use questboard::board::TaskBoard;
use questboard::domain::{Column, Difficulty, Task};
use questboard::gamification::{FixedClock, ProgressEngine};
use questboard::store::{MemoryStore, SqliteStore, Store};

/// Milliseconds at `hour`:00 UTC on `date` ("YYYY-MM-DD")
pub fn at(date: &str, hour: u32) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid hour")
        .and_utc()
        .timestamp_millis()
}

/// A store, a pinned clock and whatever keeps the store's files alive
pub struct Fixture {
    pub name: &'static str,
    pub store: Arc<dyn Store>,
    pub clock: Arc<FixedClock>,
    pub dir: Option<TempDir>,
}

impl Fixture {
    pub fn memory(now: i64) -> Self {
        Self {
            name: "memory",
            store: Arc::new(MemoryStore::new()),
            clock: Arc::new(FixedClock::new(now)),
            dir: None,
        }
    }

    pub fn sqlite(now: i64) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqliteStore::open(&dir.path().join("questboard.db"))
            .expect("Failed to open SQLite store");
        Self {
            name: "sqlite",
            store: Arc::new(store),
            clock: Arc::new(FixedClock::new(now)),
            dir: Some(dir),
        }
    }

    /// One fixture per backend
    pub fn all(now: i64) -> Vec<Self> {
        vec![Self::memory(now), Self::sqlite(now)]
    }

    pub fn board(&self) -> TaskBoard {
        TaskBoard::new(self.store.clone(), self.clock.clone())
    }

    pub fn engine(&self) -> ProgressEngine {
        ProgressEngine::load(self.store.clone(), self.clock.clone())
            .unwrap_or_else(|e| panic!("[{}] load failed: {e}", self.name))
    }

    /// Add a task and complete it on the board, as the CLI does before
    /// handing it to the engine
    pub fn finish(&self, column: Column, difficulty: Difficulty) -> Task {
        let board = self.board();
        let task = board
            .add("task", column, difficulty, None, vec![])
            .expect("add task");
        board.complete(&task.id).expect("complete task")
    }
}
