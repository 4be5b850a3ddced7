//! CLI command implementations

pub mod history;
pub mod init;
pub mod progress;
pub mod task;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use questboard::board::TaskBoard;
use questboard::config::{Config, StorageBackend};
use questboard::domain::{Column, Difficulty};
use questboard::gamification::{Clock, ProgressEngine, SystemClock};
use questboard::store::{self, Store};

/// Loaded config plus the store it selects
pub struct Session {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub clock: Arc<dyn Clock>,
}

impl Session {
    /// Load the config and open its store.
    ///
    /// `ephemeral` swaps in an empty in-memory store that lives only as long
    /// as this session, so nothing from earlier commands is visible.
    pub fn open(config_path: Option<&Path>, ephemeral: bool) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Config::from_file(path)?,
            None => Config::load()?,
        };
        if ephemeral {
            config.storage.backend = StorageBackend::Memory;
        }

        let db_path = config.db_path();
        let store = store::open_store(&config.storage, &db_path)
            .with_context(|| format!("Failed to open store at {}", db_path.display()))?;

        Ok(Self {
            config,
            store,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn board(&self) -> TaskBoard {
        TaskBoard::new(self.store.clone(), self.clock.clone())
    }

    pub fn engine(&self) -> Result<ProgressEngine> {
        ProgressEngine::load(self.store.clone(), self.clock.clone())
            .context("Failed to load progress")
    }
}

pub fn parse_column(s: &str) -> Result<Column, String> {
    Column::from_str(s).ok_or_else(|| {
        format!("unknown column '{s}' (expected do_first, do_later or do_free)")
    })
}

pub fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.parse::<u8>()
        .ok()
        .and_then(Difficulty::from_u8)
        .ok_or_else(|| format!("difficulty must be 1, 2 or 3, got '{s}'"))
}

/// `YYYY-MM-DD` as midnight UTC in ms since epoch
pub fn parse_due_date(s: &str) -> Result<i64, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| format!("due date must look like 2026-01-31, got '{s}'"))
}

/// Text bar of `width` cells, filled to `fraction` (0.0 - 1.0)
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// First 8 characters of a task id
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
