//! Board commands: add, list, edit, move, delete, done

use anyhow::{Context, Result, bail};
use serde::Serialize;

use questboard::board::TaskEdit;
use questboard::domain::{Column, Difficulty, Task};
use questboard::gamification::{BadgeDefinition, CompletionResult, quest_label, to_date_string};

use super::{Session, short_id};

pub async fn add_command(
    session: &Session,
    title: &str,
    column: Option<Column>,
    difficulty: Option<Difficulty>,
    notes: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Task title must not be empty");
    }

    let settings = &session.config.settings;
    let column = column.unwrap_or(settings.default_column);
    let difficulty = difficulty.unwrap_or(settings.default_difficulty);

    let task = session
        .board()
        .add(title, column, difficulty, notes, tags)
        .context("Failed to add task")?;

    println!(
        "Added {} to {} ({})",
        short_id(&task.id),
        column.label(),
        difficulty.label()
    );
    Ok(())
}

/// Show active tasks grouped by column
pub async fn list_command(session: &Session) -> Result<()> {
    let board = session.board();
    if board.active()?.is_empty() {
        println!("No active tasks.");
        return Ok(());
    }

    for column in Column::all() {
        let tasks = board.by_column(*column)?;
        println!("{} ({}):", column.label(), tasks.len());
        for task in &tasks {
            print_task_line(task);
        }
        println!();
    }
    Ok(())
}

fn print_task_line(task: &Task) {
    let tags = if task.tags.is_empty() {
        String::new()
    } else {
        format!(" #{}", task.tags.join(" #"))
    };
    let due = task
        .due_at
        .map(|ms| format!(" (due {})", to_date_string(ms)))
        .unwrap_or_default();
    println!(
        "  {} [{}] {}{}{}",
        short_id(&task.id),
        task.difficulty.as_u8(),
        task.title,
        due,
        tags
    );
    if let Some(notes) = &task.notes {
        println!("      {}", notes);
    }
}

/// Change fields of an active task
pub async fn edit_command(session: &Session, id: &str, edit: TaskEdit) -> Result<()> {
    if edit.is_empty() {
        bail!("Nothing to change (see `questboard edit --help`)");
    }
    if edit.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        bail!("Task title must not be empty");
    }

    let board = session.board();
    let id = board.resolve_id(id)?;
    let task = board.edit(&id, edit).context("Failed to edit task")?;

    println!("Updated {}:", short_id(&task.id));
    print_task_line(&task);
    Ok(())
}

pub async fn move_command(session: &Session, id: &str, column: Column) -> Result<()> {
    let board = session.board();
    let id = board.resolve_id(id)?;
    let task = board.move_to(&id, column)?;
    println!("Moved {} to {}", short_id(&task.id), column.label());
    Ok(())
}

pub async fn delete_command(session: &Session, id: &str) -> Result<()> {
    let board = session.board();
    let id = board.resolve_id(id)?;
    board.delete(&id)?;
    println!("Deleted {}", short_id(&id));
    Ok(())
}

#[derive(Serialize)]
struct DoneReport<'a> {
    task: &'a Task,
    #[serde(flatten)]
    result: &'a CompletionResult,
    bonus_xp: u64,
}

/// Complete a task and run it through the progress engine
pub async fn done_command(session: &Session, id: &str, json: bool) -> Result<()> {
    let board = session.board();
    let mut engine = session.engine()?;

    let id = board.resolve_id(id)?;
    let task = board.complete(&id)?;
    let result = engine
        .record_completion(&task)
        .context("Task completed, but progress could not be recorded")?;

    if json {
        let report = DoneReport {
            task: &task,
            result: &result,
            bonus_xp: result.bonus_xp(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_celebration(&task, &result, engine.state().progress.level);
    Ok(())
}

fn print_celebration(task: &Task, result: &CompletionResult, level: u32) {
    println!("Completed: {}", task.title);
    println!("  +{} XP", result.xp_awarded);

    for quest in &result.completed_quests {
        println!(
            "  Quest complete: {} (+{} XP)",
            quest_label(quest.quest_type),
            quest.reward_xp
        );
    }

    if let Some(new_level) = result.new_level {
        println!("  Level up! You reached level {}", new_level);
    } else {
        println!("  Level {}", level);
    }

    for badge_type in &result.new_badges {
        let def = BadgeDefinition::get(*badge_type);
        println!("  Badge unlocked: {} {} - {}", def.icon, def.label, def.description);
    }
}
