use serde::{Deserialize, Serialize};

/// Workflow bucket a task lives in on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Urgent and important
    DoFirst,
    /// Important, not urgent
    DoLater,
    /// Everything else
    DoFree,
}

impl Column {
    /// Storage code for the column
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::DoFirst => "do_first",
            Column::DoLater => "do_later",
            Column::DoFree => "do_free",
        }
    }

    /// Parse from a storage code. Dashes are accepted in place of underscores
    /// so that `do-first` works on the command line.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "do_first" => Some(Column::DoFirst),
            "do_later" => Some(Column::DoLater),
            "do_free" => Some(Column::DoFree),
            _ => None,
        }
    }

    /// Display label used by the board
    pub fn label(&self) -> &'static str {
        match self {
            Column::DoFirst => "Do First",
            Column::DoLater => "Do Later",
            Column::DoFree => "Do Free",
        }
    }

    pub fn all() -> &'static [Column] {
        &[Column::DoFirst, Column::DoLater, Column::DoFree]
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How hard a task is; drives the XP it awards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Difficulty::from_u8(value).ok_or_else(|| format!("difficulty must be 1, 2 or 3, got {value}"))
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.as_u8()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub column: Column,
    /// Creation time (ms since epoch)
    pub created_at: i64,
    pub due_at: Option<i64>,
    /// Set by the board right before the task is handed to the progress engine
    pub completed_at: Option<i64>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Create a new active task with a random id
    pub fn new(
        title: impl Into<String>,
        column: Column,
        difficulty: Difficulty,
        created_at: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            notes: None,
            column,
            created_at,
            due_at: None,
            completed_at: None,
            difficulty,
            tags: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Copy of this task marked completed at `timestamp`
    pub fn completed(&self, timestamp: i64) -> Self {
        Self {
            completed_at: Some(timestamp),
            ..self.clone()
        }
    }
}
