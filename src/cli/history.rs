//! History command implementation

use anyhow::Result;

use questboard::gamification::to_date_string;
use questboard::store::CompletionRepository;

use super::{Session, short_id};

/// Recently completed tasks and the total XP they earned
pub async fn history_command(session: &Session) -> Result<()> {
    let limit = session.config.settings.history_limit;
    let tasks = session.board().completed(limit)?;
    let events = session.store.completion_get_all()?;

    if tasks.is_empty() {
        println!("Nothing completed yet.");
        return Ok(());
    }

    println!("Recently completed ({}):\n", tasks.len());
    for task in &tasks {
        let when = task.completed_at.map(to_date_string).unwrap_or_default();
        let xp: u64 = events
            .iter()
            .filter(|e| e.task_id == task.id)
            .map(|e| e.xp_awarded)
            .sum();
        println!(
            "  {} {} {} (+{} XP, {})",
            when,
            short_id(&task.id),
            task.title,
            xp,
            task.column.label()
        );
    }

    let total_xp: u64 = events.iter().map(|e| e.xp_awarded).sum();
    println!(
        "\n{} completion(s) logged, {} base XP earned",
        events.len(),
        total_xp
    );
    Ok(())
}
