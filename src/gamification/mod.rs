//! Gamification system for Questboard
//!
//! Provides:
//! - XP and levels (`levels`)
//! - Daily streaks (`streaks`)
//! - Weekly quests (`quests`)
//! - Badges (`badges`)
//! - The [`ProgressEngine`] that applies a task completion to all of them
//!
//! Everything except the engine is pure and takes "now" as a parameter.

pub mod badges;
pub mod clock;
pub mod engine;
mod error;
pub mod levels;
mod models;
pub mod quests;
pub mod streaks;
pub mod time_bucket;

pub use badges::{
    BADGE_DEFINITIONS, Badge, BadgeCheckInput, BadgeDefinition, BadgeType, check_new_badges,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::ProgressEngine;
pub use error::{EngineError, EngineResult};
pub use levels::{
    UserProgress, XpProgress, XpRewards, apply_xp, compute_level, compute_xp_progress,
    cumulative_xp_for_level, did_level_up, xp_for_difficulty, xp_required_for_level,
};
pub use models::{CompletionEvent, CompletionResult, ProgressState};
pub use quests::{
    QUEST_DEFINITIONS, Quest, QuestDefinition, QuestType, generate_weekly_quests,
    is_quest_for_week, quest_id, quest_label, update_quest_progress,
};
pub use streaks::{Streak, compute_streak, is_streak_active};
pub use time_bucket::{monday_string, to_date_string, today_string, yesterday_string};
