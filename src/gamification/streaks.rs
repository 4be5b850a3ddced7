//! Daily streak tracking
//!
//! A streak counts consecutive UTC calendar days with at least one completed
//! task. "Today" and "yesterday" come from the `now_ms` the caller passes in,
//! not from the completion timestamp being recorded.

use serde::{Deserialize, Serialize};

use super::time_bucket::{to_date_string, today_string, yesterday_string};

/// Streak state loaded from storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
    /// "YYYY-MM-DD" (UTC) of the last counted completion
    pub last_completion_date: Option<String>,
}

/// Record a completion and return the new streak state.
///
/// Re-completing on a day that already counted leaves the streak untouched.
pub fn compute_streak(current: &Streak, completion_timestamp: i64, now_ms: i64) -> Streak {
    let today = today_string(now_ms);
    let yesterday = yesterday_string(now_ms);

    if current.last_completion_date.as_deref() == Some(today.as_str()) {
        return current.clone();
    }

    let new_current = match current.last_completion_date.as_deref() {
        None => current.current + 1,
        Some(last) if last == yesterday => current.current + 1,
        Some(_) => 1, // Reset
    };

    Streak {
        current: new_current,
        best: new_current.max(current.best),
        last_completion_date: Some(to_date_string(completion_timestamp)),
    }
}

/// Still alive if the last completion was today or yesterday
pub fn is_streak_active(streak: &Streak, now_ms: i64) -> bool {
    let Some(last) = streak.last_completion_date.as_deref() else {
        return false;
    };
    last == today_string(now_ms) || last == yesterday_string(now_ms)
}
