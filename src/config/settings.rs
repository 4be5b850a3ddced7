//! Settings configuration types

use serde::{Deserialize, Serialize};

use crate::domain::{Column, Difficulty};

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Completed tasks shown by `history`
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Column for `add` when none is given
    #[serde(default = "default_column")]
    pub default_column: Column,

    /// Difficulty for `add` when none is given
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,
}

fn default_history_limit() -> usize {
    30
}

fn default_column() -> Column {
    Column::DoFirst
}

fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_column: default_column(),
            default_difficulty: default_difficulty(),
        }
    }
}
