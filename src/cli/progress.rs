//! Progress command implementation

use anyhow::Result;
use serde::Serialize;

use questboard::gamification::{
    BadgeDefinition, ProgressState, QuestDefinition, XpProgress, quest_label, today_string,
};

use super::{Session, progress_bar};

#[derive(Serialize)]
struct ProgressReport<'a> {
    #[serde(flatten)]
    state: &'a ProgressState,
    xp_progress: XpProgress,
    streak_active: bool,
}

/// Show level, streak, this week's quests and badges
pub async fn progress_command(session: &Session, json: bool) -> Result<()> {
    let engine = session.engine()?;
    let state = engine.state();
    let now = session.clock.now_ms();
    let xp = state.xp_progress();
    let streak_active = state.streak_active(now);

    if json {
        let report = ProgressReport {
            state,
            xp_progress: xp,
            streak_active,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Level {}  {} XP total", xp.level, state.progress.xp);
    println!(
        "  {} {}/{} XP to level {}",
        progress_bar(xp.progress, 20),
        xp.xp_into_level,
        xp.xp_for_next_level,
        xp.level + 1
    );
    println!();

    let streak = &state.streak;
    let status = if streak_active { "active" } else { "inactive" };
    println!(
        "Streak: {} day(s) ({}), best {}",
        streak.current, status, streak.best
    );
    if let Some(last) = &streak.last_completion_date {
        println!("  Last completion: {} (today is {})", last, today_string(now));
    }
    println!();

    if let Some(first) = state.quests.first() {
        println!("Quests {} - {}:", first.start_date, first.end_date);
    }
    for quest in &state.quests {
        let def = QuestDefinition::get(quest.quest_type);
        let status = if quest.is_completed() {
            "done".to_string()
        } else {
            format!("{}/{}", quest.progress, quest.target)
        };
        println!(
            "  {} {} {} {} (+{} XP)",
            def.icon,
            progress_bar(f64::from(quest.progress_percent()), 10),
            quest_label(quest.quest_type),
            status,
            quest.reward_xp
        );
    }
    println!();

    let unlocked = state.unlocked_badges().count();
    println!("Badges ({}/{}):", unlocked, state.badges.len());
    for badge in &state.badges {
        let def = BadgeDefinition::get(badge.badge_type);
        let mark = if badge.is_unlocked() { def.icon } else { "  " };
        println!("  {} {} - {}", mark, def.label, def.description);
    }

    Ok(())
}
