//! SQLite backend
//!
//! One database file holds the board and all gamification state. Schema
//! changes are applied in numbered migrations tracked in `schema_version`.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{
    BadgeRepository, CompletionRepository, ProgressRepository, QuestRepository, StoreError,
    StoreResult, StreakRepository, TaskRepository,
};
use crate::domain::{Column, Difficulty, Task};
use crate::gamification::{Badge, BadgeType, CompletionEvent, Quest, QuestType, Streak, UserProgress};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    notes TEXT,
    column_name TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    due_at INTEGER,
    completed_at INTEGER,
    difficulty INTEGER NOT NULL DEFAULT 1,
    tags TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed_at);

CREATE TABLE IF NOT EXISTS user_progress (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    xp INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1
);
INSERT OR IGNORE INTO user_progress (id) VALUES (1);
"#;

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::with_connection(conn)
    }

    /// Private database that lives as long as the store
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()
    }

    fn run_migrations(&self) -> StoreResult<()> {
        let conn = self.conn()?;

        let version: i32 = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )?;

        // Migration 1: gamification tables
        if version < 1 {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS completion_events (
                    id TEXT PRIMARY KEY,
                    task_id TEXT NOT NULL,
                    timestamp INTEGER NOT NULL,
                    xp_awarded INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_completion_ts ON completion_events(timestamp);

                -- Singleton
                CREATE TABLE IF NOT EXISTS streak (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    current INTEGER NOT NULL DEFAULT 0,
                    best INTEGER NOT NULL DEFAULT 0,
                    last_completion_date TEXT
                );
                INSERT OR IGNORE INTO streak (id) VALUES (1);

                CREATE TABLE IF NOT EXISTS quests (
                    id TEXT PRIMARY KEY,
                    quest_type TEXT NOT NULL,
                    target INTEGER NOT NULL,
                    progress INTEGER NOT NULL DEFAULT 0,
                    start_date TEXT NOT NULL,
                    end_date TEXT NOT NULL,
                    reward_xp INTEGER NOT NULL,
                    completed_at INTEGER
                );
                CREATE INDEX IF NOT EXISTS idx_quests_week ON quests(start_date);

                CREATE TABLE IF NOT EXISTS badges (
                    id TEXT PRIMARY KEY,
                    badge_type TEXT NOT NULL UNIQUE,
                    unlocked_at INTEGER
                );
                "#,
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (1)", [])?;
        }

        Ok(())
    }
}

// ------------------------------------------------------------------
// Row mapping
// ------------------------------------------------------------------

struct TaskRow {
    id: String,
    title: String,
    notes: Option<String>,
    column: String,
    created_at: i64,
    due_at: Option<i64>,
    completed_at: Option<i64>,
    difficulty: i64,
    tags: String,
}

const TASK_COLUMNS: &str =
    "id, title, notes, column_name, created_at, due_at, completed_at, difficulty, tags";

impl TaskRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            title: r.get(1)?,
            notes: r.get(2)?,
            column: r.get(3)?,
            created_at: r.get(4)?,
            due_at: r.get(5)?,
            completed_at: r.get(6)?,
            difficulty: r.get(7)?,
            tags: r.get(8)?,
        })
    }

    fn into_task(self) -> StoreResult<Task> {
        let column = Column::from_str(&self.column).ok_or_else(|| StoreError::Corrupt {
            entity: "task",
            reason: format!("unknown column '{}'", self.column),
        })?;
        let difficulty = u8::try_from(self.difficulty)
            .ok()
            .and_then(Difficulty::from_u8)
            .ok_or_else(|| StoreError::Corrupt {
                entity: "task",
                reason: format!("difficulty {} out of range", self.difficulty),
            })?;

        Ok(Task {
            id: self.id,
            title: self.title,
            notes: self.notes,
            column,
            created_at: self.created_at,
            due_at: self.due_at,
            completed_at: self.completed_at,
            difficulty,
            tags: split_tags(&self.tags),
        })
    }
}

fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stored integer that must not be negative
fn unsigned(entity: &'static str, field: &str, value: i64) -> StoreResult<u64> {
    u64::try_from(value).map_err(|_| StoreError::Corrupt {
        entity,
        reason: format!("{field} is negative ({value})"),
    })
}

/// Raw `quests` row, validated by [`QuestRow::into_quest`]
struct QuestRow {
    id: String,
    quest_type: String,
    target: u32,
    progress: u32,
    start_date: String,
    end_date: String,
    reward_xp: i64,
    completed_at: Option<i64>,
}

impl QuestRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            quest_type: r.get(1)?,
            target: r.get(2)?,
            progress: r.get(3)?,
            start_date: r.get(4)?,
            end_date: r.get(5)?,
            reward_xp: r.get(6)?,
            completed_at: r.get(7)?,
        })
    }

    fn into_quest(self) -> StoreResult<Quest> {
        let quest_type =
            QuestType::from_str(&self.quest_type).ok_or_else(|| StoreError::Corrupt {
                entity: "quest",
                reason: format!("unknown quest type '{}'", self.quest_type),
            })?;

        Ok(Quest {
            id: self.id,
            quest_type,
            target: self.target,
            progress: self.progress,
            start_date: self.start_date,
            end_date: self.end_date,
            reward_xp: unsigned("quest", "reward_xp", self.reward_xp)?,
            completed_at: self.completed_at,
        })
    }
}

// ------------------------------------------------------------------
// Repositories
// ------------------------------------------------------------------

impl ProgressRepository for SqliteStore {
    fn progress_get(&self) -> StoreResult<UserProgress> {
        let conn = self.conn()?;
        let row = conn
            .query_row("SELECT xp, level FROM user_progress WHERE id = 1", [], |r| {
                Ok((r.get::<_, i64>(0)?, r.get::<_, u32>(1)?))
            })
            .optional()?;

        match row {
            Some((xp, level)) => Ok(UserProgress {
                xp: unsigned("user_progress", "xp", xp)?,
                level: level.max(1),
            }),
            None => Ok(UserProgress::default()),
        }
    }

    fn progress_save(&self, progress: &UserProgress) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO user_progress (id, xp, level) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET xp = excluded.xp, level = excluded.level",
            params![progress.xp as i64, progress.level],
        )?;
        Ok(())
    }
}

impl StreakRepository for SqliteStore {
    fn streak_get(&self) -> StoreResult<Streak> {
        let conn = self.conn()?;
        let streak = conn
            .query_row(
                "SELECT current, best, last_completion_date FROM streak WHERE id = 1",
                [],
                |r| {
                    Ok(Streak {
                        current: r.get(0)?,
                        best: r.get(1)?,
                        last_completion_date: r.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(streak.unwrap_or_default())
    }

    fn streak_save(&self, streak: &Streak) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO streak (id, current, best, last_completion_date) VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                current = excluded.current,
                best = excluded.best,
                last_completion_date = excluded.last_completion_date",
            params![streak.current, streak.best, streak.last_completion_date],
        )?;
        Ok(())
    }
}

impl QuestRepository for SqliteStore {
    fn quest_get_current_week(&self, monday: &str) -> StoreResult<Vec<Quest>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, quest_type, target, progress, start_date, end_date, reward_xp, completed_at
             FROM quests WHERE start_date = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([monday], QuestRow::read)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(QuestRow::into_quest).collect()
    }

    fn quest_create(&self, quest: &Quest) -> StoreResult<()> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO quests
                (id, quest_type, target, progress, start_date, end_date, reward_xp, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                quest.id,
                quest.quest_type.as_str(),
                quest.target,
                quest.progress,
                quest.start_date,
                quest.end_date,
                quest.reward_xp as i64,
                quest.completed_at,
            ],
        )?;
        if inserted == 0 {
            return Err(StoreError::AlreadyExists {
                entity: "quest",
                id: quest.id.clone(),
            });
        }
        Ok(())
    }

    fn quest_update(&self, quest: &Quest) -> StoreResult<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE quests SET progress = ?2, completed_at = ?3 WHERE id = ?1",
            params![quest.id, quest.progress, quest.completed_at],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                entity: "quest",
                id: quest.id.clone(),
            });
        }
        Ok(())
    }
}

impl BadgeRepository for SqliteStore {
    fn badge_get_all(&self) -> StoreResult<Vec<Badge>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, badge_type, unlocked_at FROM badges")?;
        let rows = stmt
            .query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, Option<i64>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut badges = rows
            .into_iter()
            .map(|(id, raw_type, unlocked_at)| {
                let badge_type =
                    BadgeType::from_str(&raw_type).ok_or_else(|| StoreError::Corrupt {
                        entity: "badge",
                        reason: format!("unknown badge type '{raw_type}'"),
                    })?;
                Ok(Badge {
                    id,
                    badge_type,
                    unlocked_at,
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        badges.sort_by_key(|b| BadgeType::all().iter().position(|t| *t == b.badge_type));
        Ok(badges)
    }

    fn badge_ensure_all_exist(&self, types: &[BadgeType]) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for badge_type in types {
            tx.execute(
                "INSERT OR IGNORE INTO badges (id, badge_type, unlocked_at) VALUES (?1, ?1, NULL)",
                [badge_type.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn badge_upsert(&self, badge: &Badge) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO badges (id, badge_type, unlocked_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET unlocked_at = excluded.unlocked_at",
            params![badge.id, badge.badge_type.as_str(), badge.unlocked_at],
        )?;
        Ok(())
    }
}

impl CompletionRepository for SqliteStore {
    fn completion_create(&self, event: &CompletionEvent) -> StoreResult<()> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO completion_events (id, task_id, timestamp, xp_awarded)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                event.id,
                event.task_id,
                event.timestamp,
                event.xp_awarded as i64
            ],
        )?;
        if inserted == 0 {
            return Err(StoreError::AlreadyExists {
                entity: "completion event",
                id: event.id.clone(),
            });
        }
        Ok(())
    }

    fn completion_get_all(&self) -> StoreResult<Vec<CompletionEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, task_id, timestamp, xp_awarded FROM completion_events
             ORDER BY timestamp DESC, rowid DESC",
        )?;
        let rows = stmt
            .query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, i64>(2)?,
                    r.get::<_, i64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, task_id, timestamp, xp_awarded)| {
                Ok(CompletionEvent {
                    id,
                    task_id,
                    timestamp,
                    xp_awarded: unsigned("completion", "xp_awarded", xp_awarded)?,
                })
            })
            .collect()
    }
}

impl TaskRepository for SqliteStore {
    fn task_get(&self, id: &str) -> StoreResult<Option<Task>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                [id],
                TaskRow::read,
            )
            .optional()?;
        row.map(TaskRow::into_task).transpose()
    }

    fn task_get_active(&self) -> StoreResult<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE completed_at IS NULL
             ORDER BY created_at DESC"
        ))?;
        let rows = stmt
            .query_map([], TaskRow::read)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(TaskRow::into_task).collect()
    }

    fn task_get_completed(&self, limit: usize) -> StoreResult<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE completed_at IS NOT NULL
             ORDER BY completed_at DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map([limit as i64], TaskRow::read)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(TaskRow::into_task).collect()
    }

    fn task_create(&self, task: &Task) -> StoreResult<()> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            &format!(
                "INSERT OR IGNORE INTO tasks ({TASK_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                task.id,
                task.title,
                task.notes,
                task.column.as_str(),
                task.created_at,
                task.due_at,
                task.completed_at,
                task.difficulty.as_u8(),
                join_tags(&task.tags),
            ],
        )?;
        if inserted == 0 {
            return Err(StoreError::AlreadyExists {
                entity: "task",
                id: task.id.clone(),
            });
        }
        Ok(())
    }

    fn task_update(&self, task: &Task) -> StoreResult<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE tasks SET
                title = ?2, notes = ?3, column_name = ?4, due_at = ?5,
                completed_at = ?6, difficulty = ?7, tags = ?8
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.notes,
                task.column.as_str(),
                task.due_at,
                task.completed_at,
                task.difficulty.as_u8(),
                join_tags(&task.tags),
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                entity: "task",
                id: task.id.clone(),
            });
        }
        Ok(())
    }

    fn task_delete(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound {
                entity: "task",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn task_count_completed(&self) -> StoreResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE completed_at IS NOT NULL",
            [],
            |r| r.get(0),
        )?;
        unsigned("task", "count", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::generate_weekly_quests;
    use tempfile::TempDir;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_fresh_database_defaults() {
        let s = store();
        assert_eq!(s.progress_get().unwrap(), UserProgress { xp: 0, level: 1 });
        assert_eq!(s.streak_get().unwrap(), Streak::default());
        assert!(s.badge_get_all().unwrap().is_empty());
        assert!(s.completion_get_all().unwrap().is_empty());
        assert_eq!(s.task_count_completed().unwrap(), 0);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("board.db");

        {
            let s = SqliteStore::open(&path).unwrap();
            s.progress_save(&UserProgress { xp: 150, level: 2 }).unwrap();
            s.streak_save(&Streak {
                current: 2,
                best: 4,
                last_completion_date: Some("2026-01-02".into()),
            })
            .unwrap();
        }

        let s = SqliteStore::open(&path).unwrap();
        assert_eq!(s.progress_get().unwrap(), UserProgress { xp: 150, level: 2 });
        assert_eq!(s.streak_get().unwrap().best, 4);
    }

    #[test]
    fn test_task_crud() {
        let s = store();
        let mut task = Task::new("Write report", Column::DoFirst, Difficulty::Hard, 1_000);
        task.tags = vec!["work".into(), "q1".into()];
        s.task_create(&task).unwrap();

        assert_eq!(s.task_get(&task.id).unwrap(), Some(task.clone()));
        assert!(matches!(
            s.task_create(&task),
            Err(StoreError::AlreadyExists { .. })
        ));

        let done = task.completed(2_000);
        s.task_update(&done).unwrap();
        assert!(s.task_get_active().unwrap().is_empty());
        assert_eq!(s.task_get_completed(10).unwrap(), vec![done.clone()]);
        assert_eq!(s.task_count_completed().unwrap(), 1);

        s.task_delete(&task.id).unwrap();
        assert_eq!(s.task_get(&task.id).unwrap(), None);
        assert!(matches!(
            s.task_delete(&task.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_quests_by_week() {
        let s = store();
        let quests = generate_weekly_quests(1_767_960_000_000);
        for q in &quests {
            s.quest_create(q).unwrap();
        }
        assert!(matches!(
            s.quest_create(&quests[0]),
            Err(StoreError::AlreadyExists { .. })
        ));

        let monday = quests[0].start_date.clone();
        assert_eq!(s.quest_get_current_week(&monday).unwrap(), quests);
        assert!(s.quest_get_current_week("1999-01-04").unwrap().is_empty());

        let mut q = quests[2].clone();
        q.progress = 1;
        q.completed_at = Some(42);
        s.quest_update(&q).unwrap();
        assert_eq!(s.quest_get_current_week(&monday).unwrap()[2], q);
    }

    #[test]
    fn test_badges_seed_and_unlock() {
        let s = store();
        s.badge_ensure_all_exist(BadgeType::all()).unwrap();
        s.badge_ensure_all_exist(BadgeType::all()).unwrap();

        let badges = s.badge_get_all().unwrap();
        assert_eq!(badges.len(), BadgeType::all().len());
        assert!(badges.iter().all(|b| !b.is_unlocked()));

        s.badge_upsert(&Badge {
            unlocked_at: Some(7),
            ..Badge::locked(BadgeType::Streak3)
        })
        .unwrap();
        s.badge_ensure_all_exist(BadgeType::all()).unwrap();

        let streak3 = s
            .badge_get_all()
            .unwrap()
            .into_iter()
            .find(|b| b.badge_type == BadgeType::Streak3)
            .unwrap();
        assert_eq!(streak3.unlocked_at, Some(7));
    }

    #[test]
    fn test_completion_log_newest_first() {
        let s = store();
        for (i, ts) in [100, 300, 200].into_iter().enumerate() {
            s.completion_create(&CompletionEvent {
                id: format!("t{i}_{ts}"),
                task_id: format!("t{i}"),
                timestamp: ts,
                xp_awarded: 10,
            })
            .unwrap();
        }
        let ts: Vec<_> = s
            .completion_get_all()
            .unwrap()
            .iter()
            .map(|e| e.timestamp)
            .collect();
        assert_eq!(ts, vec![300, 200, 100]);
    }

    #[test]
    fn test_corrupt_quest_type_is_reported() {
        let s = store();
        s.conn()
            .unwrap()
            .execute(
                "INSERT INTO quests VALUES ('x', 'bogus', 1, 0, '2026-01-05', '2026-01-11', 10, NULL)",
                [],
            )
            .unwrap();
        assert!(matches!(
            s.quest_get_current_week("2026-01-05"),
            Err(StoreError::Corrupt { entity: "quest", .. })
        ));
    }

    #[test]
    fn test_negative_stored_amounts_are_reported() {
        let s = store();
        {
            let conn = s.conn().unwrap();
            conn.execute(
                "INSERT INTO quests VALUES ('q', 'complete_hard', 1, 0, '2026-01-05', '2026-01-11', -40, NULL)",
                [],
            )
            .unwrap();
            conn.execute("UPDATE user_progress SET xp = -5 WHERE id = 1", [])
                .unwrap();
        }

        assert!(matches!(
            s.quest_get_current_week("2026-01-05"),
            Err(StoreError::Corrupt { entity: "quest", .. })
        ));
        assert!(matches!(
            s.progress_get(),
            Err(StoreError::Corrupt { entity: "user_progress", .. })
        ));
    }

    #[test]
    fn test_valid_quest_row_reads_back_typed() {
        let s = store();
        s.conn()
            .unwrap()
            .execute(
                "INSERT INTO quests VALUES ('q', 'complete_hard', 1, 1, '2026-01-05', '2026-01-11', 40, 99)",
                [],
            )
            .unwrap();
        let quests = s.quest_get_current_week("2026-01-05").unwrap();
        assert_eq!(quests.len(), 1);
        assert_eq!(quests[0].quest_type, QuestType::CompleteHard);
        assert_eq!(quests[0].reward_xp, 40);
        assert_eq!(quests[0].completed_at, Some(99));
    }
}
