//! Records produced and cached by the progress engine

use serde::{Deserialize, Serialize};

use super::badges::{Badge, BadgeType};
use super::levels::{UserProgress, XpProgress, compute_xp_progress};
use super::quests::Quest;
use super::streaks::{Streak, is_streak_active};

/// One entry of the append-only completion log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// `"{task_id}_{timestamp}"`
    pub id: String,
    pub task_id: String,
    pub timestamp: i64,
    pub xp_awarded: u64,
}

impl CompletionEvent {
    pub fn new(task_id: &str, timestamp: i64, xp_awarded: u64) -> Self {
        Self {
            id: format!("{task_id}_{timestamp}"),
            task_id: task_id.to_string(),
            timestamp,
            xp_awarded,
        }
    }
}

/// What a single completion changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResult {
    /// Base XP for the task, without quest bonuses
    pub xp_awarded: u64,
    pub leveled_up: bool,
    /// Final level, only set when `leveled_up`
    pub new_level: Option<u32>,
    pub new_badges: Vec<BadgeType>,
    /// Quests that reached their target with this completion
    pub completed_quests: Vec<Quest>,
}

impl CompletionResult {
    /// Sum of the rewards of quests completed by this completion
    pub fn bonus_xp(&self) -> u64 {
        self.completed_quests.iter().map(|q| q.reward_xp).sum()
    }
}

/// Cached gamification state owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressState {
    pub progress: UserProgress,
    pub streak: Streak,
    pub quests: Vec<Quest>,
    pub badges: Vec<Badge>,
}

impl ProgressState {
    pub fn xp_progress(&self) -> XpProgress {
        compute_xp_progress(self.progress.xp)
    }

    pub fn streak_active(&self, now_ms: i64) -> bool {
        is_streak_active(&self.streak, now_ms)
    }

    pub fn unlocked_badges(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter(|b| b.is_unlocked())
    }
}
