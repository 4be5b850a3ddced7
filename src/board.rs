//! Task board: the three-column list the progress engine is fed from

use std::sync::Arc;

use crate::domain::{Column, Difficulty, Task};
use crate::gamification::Clock;
use crate::store::{Store, StoreError, StoreResult, TaskRepository};

/// Field changes applied by [`TaskBoard::edit`]; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    pub column: Option<Column>,
    pub difficulty: Option<Difficulty>,
    /// Replaces the whole tag list
    pub tags: Option<Vec<String>>,
    /// `Some(None)` clears the due date
    pub due_at: Option<Option<i64>>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Task CRUD on top of a [`Store`]
pub struct TaskBoard {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl TaskBoard {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Create and persist a new active task
    pub fn add(
        &self,
        title: &str,
        column: Column,
        difficulty: Difficulty,
        notes: Option<String>,
        tags: Vec<String>,
    ) -> StoreResult<Task> {
        let mut task = Task::new(title.trim(), column, difficulty, self.clock.now_ms());
        task.notes = notes;
        task.tags = tags;
        self.store.task_create(&task)?;
        tracing::debug!("Added task {} to {}", task.id, column);
        Ok(task)
    }

    /// Active tasks in one column, newest first
    pub fn by_column(&self, column: Column) -> StoreResult<Vec<Task>> {
        Ok(self
            .store
            .task_get_active()?
            .into_iter()
            .filter(|t| t.column == column)
            .collect())
    }

    pub fn active(&self) -> StoreResult<Vec<Task>> {
        self.store.task_get_active()
    }

    pub fn completed(&self, limit: usize) -> StoreResult<Vec<Task>> {
        self.store.task_get_completed(limit)
    }

    pub fn move_to(&self, id: &str, column: Column) -> StoreResult<Task> {
        let task = self.active_task(id)?;
        let moved = Task { column, ..task };
        self.store.task_update(&moved)?;
        Ok(moved)
    }

    /// Apply field changes to an active task
    pub fn edit(&self, id: &str, edit: TaskEdit) -> StoreResult<Task> {
        let mut task = self.active_task(id)?;
        if let Some(title) = edit.title {
            task.title = title.trim().to_string();
        }
        if let Some(notes) = edit.notes {
            task.notes = notes;
        }
        if let Some(column) = edit.column {
            task.column = column;
        }
        if let Some(difficulty) = edit.difficulty {
            task.difficulty = difficulty;
        }
        if let Some(tags) = edit.tags {
            task.tags = tags;
        }
        if let Some(due_at) = edit.due_at {
            task.due_at = due_at;
        }
        self.store.task_update(&task)?;
        tracing::debug!("Edited task {}", task.id);
        Ok(task)
    }

    /// Stamp `completed_at` and persist; the returned task goes to the progress engine
    pub fn complete(&self, id: &str) -> StoreResult<Task> {
        let task = self.active_task(id)?;
        let done = task.completed(self.clock.now_ms());
        self.store.task_update(&done)?;
        tracing::debug!("Completed task {}", id);
        Ok(done)
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.task_delete(id)
    }

    /// Resolve a full id or a unique prefix of an active task's id
    pub fn resolve_id(&self, id_or_prefix: &str) -> StoreResult<String> {
        if id_or_prefix.is_empty() {
            return Err(not_found(id_or_prefix));
        }
        if self.store.task_get(id_or_prefix)?.is_some() {
            return Ok(id_or_prefix.to_string());
        }
        let matches: Vec<Task> = self
            .store
            .task_get_active()?
            .into_iter()
            .filter(|t| t.id.starts_with(id_or_prefix))
            .collect();
        match matches.as_slice() {
            [only] => Ok(only.id.clone()),
            _ => Err(not_found(id_or_prefix)),
        }
    }

    /// Completed tasks are off the board and can no longer be moved or completed
    fn active_task(&self, id: &str) -> StoreResult<Task> {
        match self.store.task_get(id)? {
            Some(task) if !task.is_completed() => Ok(task),
            _ => Err(not_found(id)),
        }
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound {
        entity: "task",
        id: id.to_string(),
    }
}
