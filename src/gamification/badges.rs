//! Badge definitions and unlock checks
//!
//! Badges unlock once and stay unlocked. Each definition carries a predicate
//! over lifetime stats; the predicates only ever flip from false to true as
//! stats grow.

use serde::{Deserialize, Serialize};

use super::streaks::Streak;

/// Unique identifier for each badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeType {
    FirstTask,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "tasks_10")]
    Tasks10,
    #[serde(rename = "tasks_50")]
    Tasks50,
    #[serde(rename = "tasks_100")]
    Tasks100,
}

impl BadgeType {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTask => "first_task",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Tasks10 => "tasks_10",
            Self::Tasks50 => "tasks_50",
            Self::Tasks100 => "tasks_100",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_task" => Some(Self::FirstTask),
            "streak_3" => Some(Self::Streak3),
            "streak_7" => Some(Self::Streak7),
            "tasks_10" => Some(Self::Tasks10),
            "tasks_50" => Some(Self::Tasks50),
            "tasks_100" => Some(Self::Tasks100),
            _ => None,
        }
    }

    /// Get all badge types in definition order
    pub fn all() -> &'static [BadgeType] {
        &[
            Self::FirstTask,
            Self::Streak3,
            Self::Streak7,
            Self::Tasks10,
            Self::Tasks50,
            Self::Tasks100,
        ]
    }
}

impl std::fmt::Display for BadgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A badge row; locked while `unlocked_at` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub badge_type: BadgeType,
    pub unlocked_at: Option<i64>,
}

impl Badge {
    pub fn locked(badge_type: BadgeType) -> Self {
        Self {
            id: badge_type.as_str().to_string(),
            badge_type,
            unlocked_at: None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}

/// Stats a badge predicate is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct BadgeCheckInput<'a> {
    pub total_completions: u64,
    pub streak: &'a Streak,
    pub existing_badges: &'a [Badge],
}

/// Badge definition with all metadata
#[derive(Debug, Clone)]
pub struct BadgeDefinition {
    pub badge_type: BadgeType,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub check: fn(&BadgeCheckInput<'_>) -> bool,
}

fn completed_at_least_1(input: &BadgeCheckInput<'_>) -> bool {
    input.total_completions >= 1
}

fn best_streak_at_least_3(input: &BadgeCheckInput<'_>) -> bool {
    input.streak.best >= 3
}

fn best_streak_at_least_7(input: &BadgeCheckInput<'_>) -> bool {
    input.streak.best >= 7
}

fn completed_at_least_10(input: &BadgeCheckInput<'_>) -> bool {
    input.total_completions >= 10
}

fn completed_at_least_50(input: &BadgeCheckInput<'_>) -> bool {
    input.total_completions >= 50
}

fn completed_at_least_100(input: &BadgeCheckInput<'_>) -> bool {
    input.total_completions >= 100
}

/// All badge definitions
pub static BADGE_DEFINITIONS: &[BadgeDefinition] = &[
    BadgeDefinition {
        badge_type: BadgeType::FirstTask,
        label: "First Step",
        description: "Complete your first task",
        icon: "🌱",
        check: completed_at_least_1,
    },
    BadgeDefinition {
        badge_type: BadgeType::Streak3,
        label: "3 Day Streak",
        description: "Complete tasks 3 days in a row",
        icon: "🔥",
        check: best_streak_at_least_3,
    },
    BadgeDefinition {
        badge_type: BadgeType::Streak7,
        label: "7 Day Streak",
        description: "Complete tasks 7 days in a row",
        icon: "⚡",
        check: best_streak_at_least_7,
    },
    BadgeDefinition {
        badge_type: BadgeType::Tasks10,
        label: "10 Tasks",
        description: "Complete 10 tasks total",
        icon: "✨",
        check: completed_at_least_10,
    },
    BadgeDefinition {
        badge_type: BadgeType::Tasks50,
        label: "50 Tasks",
        description: "Complete 50 tasks total",
        icon: "🏆",
        check: completed_at_least_50,
    },
    BadgeDefinition {
        badge_type: BadgeType::Tasks100,
        label: "100 Tasks",
        description: "Complete 100 tasks total",
        icon: "💎",
        check: completed_at_least_100,
    },
];

impl BadgeDefinition {
    /// Get badge definition by type
    pub fn get(badge_type: BadgeType) -> &'static BadgeDefinition {
        BADGE_DEFINITIONS
            .iter()
            .find(|d| d.badge_type == badge_type)
            .expect("All badges should be defined")
    }
}

/// Badge types whose condition now holds and that are not unlocked yet,
/// in definition order
pub fn check_new_badges(input: &BadgeCheckInput<'_>) -> Vec<BadgeType> {
    let already_unlocked = |badge_type: BadgeType| {
        input
            .existing_badges
            .iter()
            .any(|b| b.badge_type == badge_type && b.is_unlocked())
    };

    BADGE_DEFINITIONS
        .iter()
        .filter(|def| !already_unlocked(def.badge_type) && (def.check)(input))
        .map(|def| def.badge_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked_all() -> Vec<Badge> {
        BadgeType::all().iter().map(|t| Badge::locked(*t)).collect()
    }

    fn streak_with_best(best: u32) -> Streak {
        Streak {
            current: 1,
            best,
            last_completion_date: None,
        }
    }

    #[test]
    fn test_every_type_defined_once() {
        assert_eq!(BADGE_DEFINITIONS.len(), BadgeType::all().len());
        for t in BadgeType::all() {
            assert_eq!(BadgeDefinition::get(*t).badge_type, *t);
            assert_eq!(BadgeType::from_str(t.as_str()), Some(*t));
        }
    }

    #[test]
    fn test_no_badges_without_completions() {
        let badges = locked_all();
        let streak = Streak::default();
        let input = BadgeCheckInput {
            total_completions: 0,
            streak: &streak,
            existing_badges: &badges,
        };
        assert!(check_new_badges(&input).is_empty());
    }

    #[test]
    fn test_first_task() {
        let badges = locked_all();
        let streak = streak_with_best(1);
        let input = BadgeCheckInput {
            total_completions: 1,
            streak: &streak,
            existing_badges: &badges,
        };
        assert_eq!(check_new_badges(&input), vec![BadgeType::FirstTask]);
    }

    #[test]
    fn test_streak_badges_use_best() {
        let badges = locked_all();
        let streak = Streak {
            current: 1,
            best: 7,
            last_completion_date: None,
        };
        let input = BadgeCheckInput {
            total_completions: 1,
            streak: &streak,
            existing_badges: &badges,
        };
        assert_eq!(
            check_new_badges(&input),
            vec![BadgeType::FirstTask, BadgeType::Streak3, BadgeType::Streak7]
        );
    }

    #[test]
    fn test_hundred_unlocks_all_task_milestones() {
        let mut badges = locked_all();
        badges[0].unlocked_at = Some(1);
        let streak = streak_with_best(1);
        let input = BadgeCheckInput {
            total_completions: 100,
            streak: &streak,
            existing_badges: &badges,
        };
        assert_eq!(
            check_new_badges(&input),
            vec![BadgeType::Tasks10, BadgeType::Tasks50, BadgeType::Tasks100]
        );
    }

    #[test]
    fn test_unlocked_badges_never_returned_again() {
        let mut badges = locked_all();
        let streak = streak_with_best(3);
        let mut seen = Vec::new();

        for total in [1u64, 5, 10, 10, 60, 120] {
            let input = BadgeCheckInput {
                total_completions: total,
                streak: &streak,
                existing_badges: &badges,
            };
            let new = check_new_badges(&input);
            for t in &new {
                assert!(!seen.contains(t), "{t} returned twice");
                seen.push(*t);
                if let Some(b) = badges.iter_mut().find(|b| b.badge_type == *t) {
                    b.unlocked_at = Some(total as i64);
                }
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_missing_rows_count_as_locked() {
        let streak = streak_with_best(0);
        let input = BadgeCheckInput {
            total_completions: 10,
            streak: &streak,
            existing_badges: &[],
        };
        assert_eq!(
            check_new_badges(&input),
            vec![BadgeType::FirstTask, BadgeType::Tasks10]
        );
    }
}
