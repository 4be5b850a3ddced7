//! Progress engine - applies a task completion to XP, streak, quests and badges
//!
//! The engine owns the cached [`ProgressState`] and is the only thing that
//! mutates it. A completion runs as a fixed sequence of persisted steps:
//!
//! 1. log the completion event
//! 2. grant base XP
//! 3. advance the streak
//! 4. advance this week's quests
//! 5. grant quest bonus XP (second write, not reported as a level up)
//! 6. unlock badges
//!
//! Any failed write aborts the remaining steps. Steps already written stay
//! written and the cache keeps its previous value until the next
//! [`ProgressEngine::reload`].

use std::sync::Arc;

use super::badges::{Badge, BadgeCheckInput, BadgeType, check_new_badges};
use super::clock::Clock;
use super::error::{EngineError, EngineResult};
use super::levels::{apply_xp, did_level_up, xp_for_difficulty};
use super::models::{CompletionEvent, CompletionResult, ProgressState};
use super::quests::{Quest, generate_weekly_quests, is_quest_for_week, update_quest_progress};
use super::streaks::compute_streak;
use super::time_bucket::monday_string;
use crate::domain::Task;
use crate::store::{
    BadgeRepository, CompletionRepository, ProgressRepository, QuestRepository, Store,
    StoreResult, StreakRepository, TaskRepository,
};

pub struct ProgressEngine {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    state: ProgressState,
}

impl ProgressEngine {
    /// Load cached state from the store.
    ///
    /// Seeds a locked row for every badge and creates this week's quests if
    /// the store has none yet.
    pub fn load(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        let state = load_state(store.as_ref(), clock.now_ms())?;
        tracing::debug!(
            "Loaded progress: xp={} level={} streak={} quests={} badges={}",
            state.progress.xp,
            state.progress.level,
            state.streak.current,
            state.quests.len(),
            state.badges.len()
        );
        Ok(Self {
            store,
            clock,
            state,
        })
    }

    /// Replace the cache with what the store currently holds
    pub fn reload(&mut self) -> EngineResult<()> {
        self.state = load_state(self.store.as_ref(), self.clock.now_ms())?;
        Ok(())
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Apply a just-completed task.
    ///
    /// The task must already be marked completed in the task store, since the
    /// badge check counts completed tasks from there.
    pub fn record_completion(&mut self, task: &Task) -> EngineResult<CompletionResult> {
        validate_task(task)?;

        let store = self.store.as_ref();
        let now = self.clock.now_ms();
        let ProgressState {
            progress,
            streak,
            quests,
            badges,
        } = &self.state;

        // ========================================
        // 1. Completion log
        // ========================================
        let xp_awarded = xp_for_difficulty(task.difficulty);
        store.completion_create(&CompletionEvent::new(&task.id, now, xp_awarded))?;
        tracing::debug!("Logged completion of {} (+{} XP)", task.id, xp_awarded);

        // ========================================
        // 2. Base XP
        // ========================================
        let base_progress = apply_xp(progress, xp_awarded);
        store.progress_save(&base_progress)?;
        let leveled_up = did_level_up(progress, &base_progress);

        // ========================================
        // 3. Streak
        // ========================================
        let new_streak = compute_streak(streak, now, now);
        store.streak_save(&new_streak)?;
        tracing::debug!(
            "Streak: current={} best={}",
            new_streak.current,
            new_streak.best
        );

        // ========================================
        // 4. Quests
        // ========================================
        let monday = monday_string(now);
        let current_week =
            !quests.is_empty() && quests.iter().all(|q| is_quest_for_week(q, &monday));
        let week_quests = if current_week {
            quests.clone()
        } else {
            tracing::debug!("Quest week rolled over to {}", monday);
            ensure_week_quests(store, now)?
        };

        let updated_quests: Vec<Quest> = week_quests
            .iter()
            .map(|q| update_quest_progress(q, task, new_streak.current, now))
            .collect();
        for quest in &updated_quests {
            store.quest_update(quest)?;
        }
        let completed_quests: Vec<Quest> = updated_quests
            .iter()
            .zip(&week_quests)
            .filter(|(after, before)| after.is_completed() && !before.is_completed())
            .map(|(after, _)| after.clone())
            .collect();
        for quest in &completed_quests {
            tracing::info!("Quest completed: {} (+{} XP)", quest.id, quest.reward_xp);
        }

        // ========================================
        // 5. Quest bonus XP
        // ========================================
        let bonus_xp: u64 = completed_quests.iter().map(|q| q.reward_xp).sum();
        let final_progress = if bonus_xp > 0 {
            let boosted = apply_xp(&base_progress, bonus_xp);
            store.progress_save(&boosted)?;
            boosted
        } else {
            base_progress
        };
        if final_progress.level > progress.level {
            tracing::info!("Level up: {} -> {}", progress.level, final_progress.level);
        }

        // ========================================
        // 6. Badges
        // ========================================
        let total_completions = store.task_count_completed()?;
        let new_badges = check_new_badges(&BadgeCheckInput {
            total_completions,
            streak: &new_streak,
            existing_badges: badges,
        });

        let mut updated_badges = badges.clone();
        for badge_type in &new_badges {
            let unlocked = Badge {
                unlocked_at: Some(now),
                ..Badge::locked(*badge_type)
            };
            store.badge_upsert(&unlocked)?;
            tracing::info!("Badge unlocked: {}", badge_type);
            upsert_cached(&mut updated_badges, unlocked);
        }

        // ========================================
        // 7. Cache
        // ========================================
        self.state = ProgressState {
            progress: final_progress,
            streak: new_streak,
            quests: updated_quests,
            badges: updated_badges,
        };

        Ok(CompletionResult {
            xp_awarded,
            leveled_up,
            new_level: leveled_up.then_some(final_progress.level),
            new_badges,
            completed_quests,
        })
    }
}

fn validate_task(task: &Task) -> EngineResult<()> {
    if task.id.trim().is_empty() {
        return Err(EngineError::InvalidTask {
            field: "id",
            reason: "must not be empty".to_string(),
        });
    }
    if task.completed_at.is_none() {
        return Err(EngineError::InvalidTask {
            field: "completed_at",
            reason: format!("task {} is not marked completed", task.id),
        });
    }
    Ok(())
}

fn load_state(store: &dyn Store, now: i64) -> EngineResult<ProgressState> {
    let progress = store.progress_get()?;
    let streak = store.streak_get()?;

    store.badge_ensure_all_exist(BadgeType::all())?;
    let badges = store.badge_get_all()?;

    let quests = ensure_week_quests(store, now)?;

    Ok(ProgressState {
        progress,
        streak,
        quests,
        badges,
    })
}

/// Quests of the week containing `now`, created and persisted on first use
fn ensure_week_quests(store: &dyn Store, now: i64) -> StoreResult<Vec<Quest>> {
    let monday = monday_string(now);
    let existing = store.quest_get_current_week(&monday)?;
    if !existing.is_empty() {
        return Ok(existing);
    }

    let quests = generate_weekly_quests(now);
    for quest in &quests {
        store.quest_create(quest)?;
    }
    tracing::debug!("Created {} quests for week of {}", quests.len(), monday);
    Ok(quests)
}

fn upsert_cached(badges: &mut Vec<Badge>, badge: Badge) {
    match badges.iter_mut().find(|b| b.badge_type == badge.badge_type) {
        Some(existing) => *existing = badge,
        None => badges.push(badge),
    }
}
