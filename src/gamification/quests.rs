//! Weekly quest system
//!
//! Every ISO week (Monday-Sunday, UTC) gets the same four quests, one per
//! [`QuestType`]. A quest completes once, when its progress reaches the target,
//! and is frozen from then on.

use serde::{Deserialize, Serialize};

use super::time_bucket::{monday_string, sunday_string};
use crate::domain::{Column, Difficulty, Task};

/// Kind of weekly objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    /// Complete N tasks of any kind
    CompleteTasks,
    /// Complete N tasks from the Do First column
    CompleteDoFirst,
    /// Complete N hard tasks
    CompleteHard,
    /// Reach an N-day streak
    MaintainStreak,
}

impl QuestType {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompleteTasks => "complete_tasks",
            Self::CompleteDoFirst => "complete_do_first",
            Self::CompleteHard => "complete_hard",
            Self::MaintainStreak => "maintain_streak",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "complete_tasks" => Some(Self::CompleteTasks),
            "complete_do_first" => Some(Self::CompleteDoFirst),
            "complete_hard" => Some(Self::CompleteHard),
            "maintain_streak" => Some(Self::MaintainStreak),
            _ => None,
        }
    }

    pub fn all() -> &'static [QuestType] {
        &[
            Self::CompleteTasks,
            Self::CompleteDoFirst,
            Self::CompleteHard,
            Self::MaintainStreak,
        ]
    }
}

/// Fixed weekly quest parameters
#[derive(Debug, Clone)]
pub struct QuestDefinition {
    pub quest_type: QuestType,
    pub label: &'static str,
    pub icon: &'static str,
    pub target: u32,
    pub reward_xp: u64,
}

/// The four quests generated for every week, in display order
pub static QUEST_DEFINITIONS: &[QuestDefinition] = &[
    QuestDefinition {
        quest_type: QuestType::CompleteTasks,
        label: "Complete 5 tasks this week",
        icon: "✅",
        target: 5,
        reward_xp: 50,
    },
    QuestDefinition {
        quest_type: QuestType::CompleteDoFirst,
        label: "Complete 3 Do First tasks",
        icon: "🎯",
        target: 3,
        reward_xp: 30,
    },
    QuestDefinition {
        quest_type: QuestType::CompleteHard,
        label: "Complete 1 hard task",
        icon: "💪",
        target: 1,
        reward_xp: 40,
    },
    QuestDefinition {
        quest_type: QuestType::MaintainStreak,
        label: "Keep a 3 day streak",
        icon: "🔥",
        target: 3,
        reward_xp: 60,
    },
];

impl QuestDefinition {
    /// Get quest definition by type
    pub fn get(quest_type: QuestType) -> &'static QuestDefinition {
        QUEST_DEFINITIONS
            .iter()
            .find(|d| d.quest_type == quest_type)
            .expect("All quest types should be defined")
    }
}

/// Display label for a quest type
pub fn quest_label(quest_type: QuestType) -> &'static str {
    QuestDefinition::get(quest_type).label
}

/// One week's instance of a quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub quest_type: QuestType,
    pub target: u32,
    pub progress: u32,
    /// Monday of the quest week, "YYYY-MM-DD"
    pub start_date: String,
    /// Sunday of the quest week, "YYYY-MM-DD"
    pub end_date: String,
    pub reward_xp: u64,
    pub completed_at: Option<i64>,
}

impl Quest {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Calculate progress percentage (0.0 - 1.0)
    pub fn progress_percent(&self) -> f32 {
        if self.is_completed() || self.target == 0 {
            1.0
        } else {
            (self.progress as f32 / self.target as f32).min(1.0)
        }
    }
}

/// Quest id for a type in the week starting `monday`
pub fn quest_id(quest_type: QuestType, monday: &str) -> String {
    format!("{}_{}", quest_type.as_str(), monday)
}

/// Fresh quests for the week containing `reference_ms`
pub fn generate_weekly_quests(reference_ms: i64) -> Vec<Quest> {
    let start_date = monday_string(reference_ms);
    let end_date = sunday_string(reference_ms);

    QUEST_DEFINITIONS
        .iter()
        .map(|def| Quest {
            id: quest_id(def.quest_type, &start_date),
            quest_type: def.quest_type,
            target: def.target,
            progress: 0,
            start_date: start_date.clone(),
            end_date: end_date.clone(),
            reward_xp: def.reward_xp,
            completed_at: None,
        })
        .collect()
}

pub fn is_quest_for_week(quest: &Quest, monday: &str) -> bool {
    quest.start_date == monday
}

/// Advance a quest for one completed task.
///
/// `current_streak` is the streak value after the completion was counted;
/// `now_ms` stamps `completed_at` when the quest reaches its target.
pub fn update_quest_progress(
    quest: &Quest,
    completed_task: &Task,
    current_streak: u32,
    now_ms: i64,
) -> Quest {
    if quest.is_completed() {
        return quest.clone();
    }

    let raw_progress = match quest.quest_type {
        QuestType::CompleteTasks => quest.progress + 1,
        QuestType::CompleteDoFirst => {
            quest.progress + u32::from(completed_task.column == Column::DoFirst)
        }
        QuestType::CompleteHard => {
            quest.progress + u32::from(completed_task.difficulty == Difficulty::Hard)
        }
        // Tracks the live streak instead of accumulating
        QuestType::MaintainStreak => current_streak,
    };

    Quest {
        progress: raw_progress.min(quest.target),
        completed_at: (raw_progress >= quest.target).then_some(now_ms),
        ..quest.clone()
    }
}
