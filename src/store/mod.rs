//! Persistence for tasks and gamification state
//!
//! The progress engine talks to storage only through the narrow repository
//! traits below. Two interchangeable backends implement all of them:
//!
//! - [`SqliteStore`]: embedded database file (default)
//! - [`MemoryStore`]: in-process maps, for tests and throwaway sessions
//!
//! The backend is picked once at startup (see [`crate::config::StorageBackend`]).

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::Task;
use crate::gamification::{Badge, BadgeType, CompletionEvent, Quest, Streak, UserProgress};

/// A single repository operation, used in error reports and fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ProgressGet,
    ProgressSave,
    StreakGet,
    StreakSave,
    QuestGetCurrentWeek,
    QuestCreate,
    QuestUpdate,
    BadgeGetAll,
    BadgeEnsureAllExist,
    BadgeUpsert,
    CompletionCreate,
    CompletionGetAll,
    TaskGet,
    TaskGetActive,
    TaskGetCompleted,
    TaskCreate,
    TaskUpdate,
    TaskDelete,
    TaskCountCompleted,
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Storage layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("Corrupt {entity} row: {reason}")]
    Corrupt { entity: &'static str, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Injected failure on {0}")]
    Injected(StoreOp),
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

pub trait ProgressRepository {
    /// Current XP/level; `{0, 1}` when nothing was saved yet
    fn progress_get(&self) -> StoreResult<UserProgress>;

    fn progress_save(&self, progress: &UserProgress) -> StoreResult<()>;
}

pub trait StreakRepository {
    /// Current streak; all zeros when nothing was saved yet
    fn streak_get(&self) -> StoreResult<Streak>;

    fn streak_save(&self, streak: &Streak) -> StoreResult<()>;
}

pub trait QuestRepository {
    /// All quests whose week starts on `monday` ("YYYY-MM-DD")
    fn quest_get_current_week(&self, monday: &str) -> StoreResult<Vec<Quest>>;

    fn quest_create(&self, quest: &Quest) -> StoreResult<()>;

    /// Persist progress and completion of an existing quest
    fn quest_update(&self, quest: &Quest) -> StoreResult<()>;
}

pub trait BadgeRepository {
    fn badge_get_all(&self) -> StoreResult<Vec<Badge>>;

    /// Seed a locked row for every type that has none. Idempotent.
    fn badge_ensure_all_exist(&self, types: &[BadgeType]) -> StoreResult<()>;

    fn badge_upsert(&self, badge: &Badge) -> StoreResult<()>;
}

pub trait CompletionRepository {
    /// Append to the completion log
    fn completion_create(&self, event: &CompletionEvent) -> StoreResult<()>;

    /// Whole completion log, newest first
    fn completion_get_all(&self) -> StoreResult<Vec<CompletionEvent>>;
}

pub trait TaskRepository {
    fn task_get(&self, id: &str) -> StoreResult<Option<Task>>;

    /// Tasks not completed yet, newest first
    fn task_get_active(&self) -> StoreResult<Vec<Task>>;

    /// Most recently completed tasks, newest first
    fn task_get_completed(&self, limit: usize) -> StoreResult<Vec<Task>>;

    fn task_create(&self, task: &Task) -> StoreResult<()>;

    fn task_update(&self, task: &Task) -> StoreResult<()>;

    fn task_delete(&self, id: &str) -> StoreResult<()>;

    /// Number of tasks with a completion marker
    fn task_count_completed(&self) -> StoreResult<u64>;
}

/// Everything the progress engine and the board need from a backend
pub trait Store:
    ProgressRepository
    + StreakRepository
    + QuestRepository
    + BadgeRepository
    + CompletionRepository
    + TaskRepository
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: ProgressRepository
        + StreakRepository
        + QuestRepository
        + BadgeRepository
        + CompletionRepository
        + TaskRepository
        + Send
        + Sync
{
}

/// Open the backend selected in the settings
pub fn open_store(settings: &StorageSettings, default_path: &Path) -> StoreResult<Arc<dyn Store>> {
    match settings.backend {
        StorageBackend::Sqlite => {
            let path = settings.path.as_deref().unwrap_or(default_path);
            tracing::debug!("Opening SQLite store at {}", path.display());
            Ok(Arc::new(SqliteStore::open(path)?))
        }
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
