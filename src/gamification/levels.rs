//! XP and Level system
//!
//! Advancing from level N to N+1 costs `N * 100` XP, so reaching level L
//! takes `100 * L * (L - 1) / 2` XP in total:
//!
//! | level | cumulative XP |
//! |-------|---------------|
//! | 1     | 0             |
//! | 2     | 100           |
//! | 3     | 300           |
//! | 4     | 600           |

use serde::{Deserialize, Serialize};

use crate::domain::Difficulty;

/// XP cost of one level step, multiplied by the level being left
const XP_PER_LEVEL_STEP: u64 = 100;

/// Persisted XP total and the level derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub xp: u64,
    pub level: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

impl UserProgress {
    /// Build a progress record whose level is derived from `xp`
    pub fn from_xp(xp: u64) -> Self {
        Self {
            xp,
            level: compute_level(xp),
        }
    }
}

/// Where a total XP value sits inside its level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XpProgress {
    pub level: u32,
    pub xp_into_level: u64,
    pub xp_for_next_level: u64,
    /// 0.0 - 1.0
    pub progress: f64,
}

/// XP rewards for completing tasks
pub struct XpRewards;

impl XpRewards {
    pub const EASY: u64 = 10;
    pub const MEDIUM: u64 = 20;
    pub const HARD: u64 = 30;
}

/// XP awarded for completing a task of the given difficulty
pub fn xp_for_difficulty(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => XpRewards::EASY,
        Difficulty::Medium => XpRewards::MEDIUM,
        Difficulty::Hard => XpRewards::HARD,
    }
}

/// XP needed to advance from `level` to `level + 1`
pub fn xp_required_for_level(level: u32) -> u64 {
    u64::from(level) * XP_PER_LEVEL_STEP
}

/// Total XP at which `level` starts, saturating at `u64::MAX`
pub fn cumulative_xp_for_level(level: u32) -> u64 {
    checked_cumulative_xp(level).unwrap_or(u64::MAX)
}

/// `None` when the threshold does not fit in a `u64`
fn checked_cumulative_xp(level: u32) -> Option<u64> {
    let level = u64::from(level.max(1));
    // L * (L - 1) fits for any u32 level; only the step multiplier can overflow
    (level * (level - 1) / 2).checked_mul(XP_PER_LEVEL_STEP)
}

/// Highest level whose starting XP is <= `total_xp`
pub fn compute_level(total_xp: u64) -> u32 {
    // Closed-form estimate, then correct for float rounding
    let steps = total_xp as f64 / XP_PER_LEVEL_STEP as f64;
    let estimate = ((1.0 + (1.0 + 8.0 * steps).sqrt()) / 2.0).floor();
    let mut level = (estimate as u32).max(1);

    while level > 1 && checked_cumulative_xp(level).is_none_or(|xp| xp > total_xp) {
        level -= 1;
    }
    while level < u32::MAX
        && checked_cumulative_xp(level + 1).is_some_and(|xp| xp <= total_xp)
    {
        level += 1;
    }
    level
}

pub fn compute_xp_progress(total_xp: u64) -> XpProgress {
    let level = compute_level(total_xp);
    let xp_into_level = total_xp - cumulative_xp_for_level(level);
    let xp_for_next_level = xp_required_for_level(level);
    let progress = (xp_into_level as f64 / xp_for_next_level as f64).min(1.0);

    XpProgress {
        level,
        xp_into_level,
        xp_for_next_level,
        progress,
    }
}

/// Add XP and re-derive the level
pub fn apply_xp(current: &UserProgress, xp_to_add: u64) -> UserProgress {
    UserProgress::from_xp(current.xp.saturating_add(xp_to_add))
}

pub fn did_level_up(before: &UserProgress, after: &UserProgress) -> bool {
    after.level > before.level
}
