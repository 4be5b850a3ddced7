//! In-memory backend
//!
//! Holds everything in maps behind `RwLock`s. Used by the test suite and by
//! `--ephemeral` sessions. Any repository operation can be told to fail with
//! [`MemoryStore::fail_on`], which lets tests exercise partial-failure paths.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{
    BadgeRepository, CompletionRepository, ProgressRepository, QuestRepository, StoreError,
    StoreOp, StoreResult, StreakRepository, TaskRepository,
};
use crate::domain::Task;
use crate::gamification::{Badge, BadgeType, CompletionEvent, Quest, Streak, UserProgress};

#[derive(Debug, Default)]
pub struct MemoryStore {
    progress: RwLock<Option<UserProgress>>,
    streak: RwLock<Option<Streak>>,
    /// Insertion order is preserved so week queries return quests as created
    quests: RwLock<Vec<Quest>>,
    badges: RwLock<HashMap<BadgeType, Badge>>,
    completions: RwLock<Vec<CompletionEvent>>,
    tasks: RwLock<HashMap<String, Task>>,
    failures: RwLock<HashSet<StoreOp>>,
}

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| StoreError::LockPoisoned)
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| StoreError::LockPoisoned)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `op` fail with [`StoreError::Injected`]
    pub fn fail_on(&self, op: StoreOp) {
        if let Ok(mut failures) = self.failures.write() {
            failures.insert(op);
        }
    }

    pub fn clear_failures(&self) {
        if let Ok(mut failures) = self.failures.write() {
            failures.clear();
        }
    }

    fn check(&self, op: StoreOp) -> StoreResult<()> {
        if read(&self.failures)?.contains(&op) {
            tracing::debug!("Injected store failure: {}", op);
            return Err(StoreError::Injected(op));
        }
        Ok(())
    }
}

impl ProgressRepository for MemoryStore {
    fn progress_get(&self) -> StoreResult<UserProgress> {
        self.check(StoreOp::ProgressGet)?;
        Ok(read(&self.progress)?.unwrap_or_default())
    }

    fn progress_save(&self, progress: &UserProgress) -> StoreResult<()> {
        self.check(StoreOp::ProgressSave)?;
        *write(&self.progress)? = Some(*progress);
        Ok(())
    }
}

impl StreakRepository for MemoryStore {
    fn streak_get(&self) -> StoreResult<Streak> {
        self.check(StoreOp::StreakGet)?;
        Ok(read(&self.streak)?.clone().unwrap_or_default())
    }

    fn streak_save(&self, streak: &Streak) -> StoreResult<()> {
        self.check(StoreOp::StreakSave)?;
        *write(&self.streak)? = Some(streak.clone());
        Ok(())
    }
}

impl QuestRepository for MemoryStore {
    fn quest_get_current_week(&self, monday: &str) -> StoreResult<Vec<Quest>> {
        self.check(StoreOp::QuestGetCurrentWeek)?;
        Ok(read(&self.quests)?
            .iter()
            .filter(|q| q.start_date == monday)
            .cloned()
            .collect())
    }

    fn quest_create(&self, quest: &Quest) -> StoreResult<()> {
        self.check(StoreOp::QuestCreate)?;
        let mut quests = write(&self.quests)?;
        if quests.iter().any(|q| q.id == quest.id) {
            return Err(StoreError::AlreadyExists {
                entity: "quest",
                id: quest.id.clone(),
            });
        }
        quests.push(quest.clone());
        Ok(())
    }

    fn quest_update(&self, quest: &Quest) -> StoreResult<()> {
        self.check(StoreOp::QuestUpdate)?;
        let mut quests = write(&self.quests)?;
        let stored = quests
            .iter_mut()
            .find(|q| q.id == quest.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "quest",
                id: quest.id.clone(),
            })?;
        stored.progress = quest.progress;
        stored.completed_at = quest.completed_at;
        Ok(())
    }
}

impl BadgeRepository for MemoryStore {
    fn badge_get_all(&self) -> StoreResult<Vec<Badge>> {
        self.check(StoreOp::BadgeGetAll)?;
        let badges = read(&self.badges)?;
        Ok(BadgeType::all()
            .iter()
            .filter_map(|t| badges.get(t).cloned())
            .collect())
    }

    fn badge_ensure_all_exist(&self, types: &[BadgeType]) -> StoreResult<()> {
        self.check(StoreOp::BadgeEnsureAllExist)?;
        let mut badges = write(&self.badges)?;
        for badge_type in types {
            badges
                .entry(*badge_type)
                .or_insert_with(|| Badge::locked(*badge_type));
        }
        Ok(())
    }

    fn badge_upsert(&self, badge: &Badge) -> StoreResult<()> {
        self.check(StoreOp::BadgeUpsert)?;
        write(&self.badges)?.insert(badge.badge_type, badge.clone());
        Ok(())
    }
}

impl CompletionRepository for MemoryStore {
    fn completion_create(&self, event: &CompletionEvent) -> StoreResult<()> {
        self.check(StoreOp::CompletionCreate)?;
        let mut completions = write(&self.completions)?;
        if completions.iter().any(|e| e.id == event.id) {
            return Err(StoreError::AlreadyExists {
                entity: "completion event",
                id: event.id.clone(),
            });
        }
        completions.push(event.clone());
        Ok(())
    }

    fn completion_get_all(&self) -> StoreResult<Vec<CompletionEvent>> {
        self.check(StoreOp::CompletionGetAll)?;
        let mut events = read(&self.completions)?.clone();
        // Ties come out newest insert first
        events.sort_by_key(|e| e.timestamp);
        events.reverse();
        Ok(events)
    }
}

impl TaskRepository for MemoryStore {
    fn task_get(&self, id: &str) -> StoreResult<Option<Task>> {
        self.check(StoreOp::TaskGet)?;
        Ok(read(&self.tasks)?.get(id).cloned())
    }

    fn task_get_active(&self) -> StoreResult<Vec<Task>> {
        self.check(StoreOp::TaskGetActive)?;
        let mut active: Vec<Task> = read(&self.tasks)?
            .values()
            .filter(|t| !t.is_completed())
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(active)
    }

    fn task_get_completed(&self, limit: usize) -> StoreResult<Vec<Task>> {
        self.check(StoreOp::TaskGetCompleted)?;
        let mut done: Vec<Task> = read(&self.tasks)?
            .values()
            .filter(|t| t.is_completed())
            .cloned()
            .collect();
        done.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        done.truncate(limit);
        Ok(done)
    }

    fn task_create(&self, task: &Task) -> StoreResult<()> {
        self.check(StoreOp::TaskCreate)?;
        let mut tasks = write(&self.tasks)?;
        if tasks.contains_key(&task.id) {
            return Err(StoreError::AlreadyExists {
                entity: "task",
                id: task.id.clone(),
            });
        }
        tasks.insert(task.id.clone(), task.clone());
        Ok(())
    }

    fn task_update(&self, task: &Task) -> StoreResult<()> {
        self.check(StoreOp::TaskUpdate)?;
        let mut tasks = write(&self.tasks)?;
        let stored = tasks.get_mut(&task.id).ok_or_else(|| StoreError::NotFound {
            entity: "task",
            id: task.id.clone(),
        })?;
        *stored = Task {
            created_at: stored.created_at,
            ..task.clone()
        };
        Ok(())
    }

    fn task_delete(&self, id: &str) -> StoreResult<()> {
        self.check(StoreOp::TaskDelete)?;
        write(&self.tasks)?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                entity: "task",
                id: id.to_string(),
            })
    }

    fn task_count_completed(&self) -> StoreResult<u64> {
        self.check(StoreOp::TaskCountCompleted)?;
        Ok(read(&self.tasks)?
            .values()
            .filter(|t| t.is_completed())
            .count() as u64)
    }
}
