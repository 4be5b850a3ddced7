//! End-to-end completion scenarios, run against every store backend

mod common;

use common::{Fixture, at};

use questboard::domain::{Column, Difficulty, Task};
use questboard::gamification::{BadgeType, QuestType, Streak, UserProgress};
use questboard::store::{
    BadgeRepository, CompletionRepository, ProgressRepository, QuestRepository, StreakRepository,
    TaskRepository,
};

const WEDNESDAY: &str = "2026-01-07";

#[test]
fn fresh_user_completes_easy_task() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        let mut engine = fx.engine();
        let task = fx.finish(Column::DoLater, Difficulty::Easy);

        let result = engine.record_completion(&task).unwrap();

        assert_eq!(result.xp_awarded, 10, "[{}]", fx.name);
        assert!(!result.leveled_up);
        assert_eq!(result.new_badges, vec![BadgeType::FirstTask], "[{}]", fx.name);
        assert_eq!(engine.state().progress, UserProgress { xp: 10, level: 1 });
        assert_eq!(engine.state().streak.current, 1);
        assert_eq!(engine.state().streak.best, 1);

        // Everything the cache holds was persisted
        assert_eq!(fx.store.progress_get().unwrap(), engine.state().progress);
        assert_eq!(fx.store.streak_get().unwrap(), engine.state().streak);
        let first = fx
            .store
            .badge_get_all()
            .unwrap()
            .into_iter()
            .find(|b| b.badge_type == BadgeType::FirstTask)
            .unwrap();
        assert_eq!(first.unlocked_at, Some(at(WEDNESDAY, 12)));
    }
}

#[test]
fn medium_task_crosses_level_boundary() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        fx.store
            .progress_save(&UserProgress { xp: 90, level: 1 })
            .unwrap();
        let mut engine = fx.engine();
        let task = fx.finish(Column::DoLater, Difficulty::Medium);

        let result = engine.record_completion(&task).unwrap();

        assert_eq!(result.xp_awarded, 20);
        assert!(result.leveled_up, "[{}]", fx.name);
        assert_eq!(result.new_level, Some(2));
        assert_eq!(engine.state().progress, UserProgress { xp: 110, level: 2 });
    }
}

#[test]
fn level_crossed_by_quest_bonus_alone_is_not_reported() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        fx.store
            .progress_save(&UserProgress { xp: 50, level: 1 })
            .unwrap();
        let mut engine = fx.engine();
        let task = fx.finish(Column::DoLater, Difficulty::Hard);

        // 50 + 30 stays on level 1; the 40 XP hard quest bonus reaches 120
        let result = engine.record_completion(&task).unwrap();

        assert!(!result.leveled_up, "[{}]", fx.name);
        assert_eq!(result.new_level, None);
        assert_eq!(result.bonus_xp(), 40);
        assert_eq!(engine.state().progress, UserProgress { xp: 120, level: 2 });
        assert_eq!(fx.store.progress_get().unwrap(), engine.state().progress);
    }
}

#[test]
fn completing_day_after_extends_streak() {
    for fx in Fixture::all(at(WEDNESDAY, 9)) {
        fx.store
            .streak_save(&Streak {
                current: 2,
                best: 2,
                last_completion_date: Some("2026-01-06".into()),
            })
            .unwrap();
        let mut engine = fx.engine();
        let task = fx.finish(Column::DoFree, Difficulty::Easy);

        let result = engine.record_completion(&task).unwrap();

        let streak = &engine.state().streak;
        assert_eq!((streak.current, streak.best), (3, 3), "[{}]", fx.name);
        assert_eq!(streak.last_completion_date.as_deref(), Some(WEDNESDAY));
        assert!(result.new_badges.contains(&BadgeType::Streak3));
        // A three day streak also finishes the streak quest
        assert!(
            result
                .completed_quests
                .iter()
                .any(|q| q.quest_type == QuestType::MaintainStreak)
        );
    }
}

#[test]
fn gap_resets_streak_but_keeps_best() {
    for fx in Fixture::all(at(WEDNESDAY, 9)) {
        fx.store
            .streak_save(&Streak {
                current: 5,
                best: 5,
                last_completion_date: Some("2026-01-03".into()),
            })
            .unwrap();
        let mut engine = fx.engine();
        let task = fx.finish(Column::DoFree, Difficulty::Easy);

        engine.record_completion(&task).unwrap();

        let streak = &engine.state().streak;
        assert_eq!((streak.current, streak.best), (1, 5), "[{}]", fx.name);
    }
}

#[test]
fn same_day_completions_do_not_grow_streak() {
    for fx in Fixture::all(at(WEDNESDAY, 9)) {
        let mut engine = fx.engine();
        for _ in 0..3 {
            let task = fx.finish(Column::DoFirst, Difficulty::Easy);
            engine.record_completion(&task).unwrap();
            fx.clock.advance(60 * 60 * 1000);
        }
        assert_eq!(engine.state().streak.current, 1, "[{}]", fx.name);
        assert_eq!(fx.store.completion_get_all().unwrap().len(), 3);
    }
}

#[test]
fn hard_quest_completes_once() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        let mut engine = fx.engine();
        let hard_quest = |engine: &questboard::gamification::ProgressEngine| {
            engine
                .state()
                .quests
                .iter()
                .find(|q| q.quest_type == QuestType::CompleteHard)
                .cloned()
                .unwrap()
        };

        let easy = fx.finish(Column::DoLater, Difficulty::Easy);
        let result = engine.record_completion(&easy).unwrap();
        assert!(result.completed_quests.is_empty());
        assert_eq!(hard_quest(&engine).progress, 0);
        assert!(hard_quest(&engine).completed_at.is_none());

        let hard = fx.finish(Column::DoLater, Difficulty::Hard);
        let result = engine.record_completion(&hard).unwrap();
        assert_eq!(result.completed_quests.len(), 1, "[{}]", fx.name);
        assert_eq!(result.bonus_xp(), 40);
        let done = hard_quest(&engine);
        assert_eq!(done.progress, 1);
        assert_eq!(done.completed_at, Some(at(WEDNESDAY, 12)));
        // 10 + 30 base + 40 bonus
        assert_eq!(engine.state().progress.xp, 80);

        fx.clock.advance(1_000);
        let again = fx.finish(Column::DoLater, Difficulty::Hard);
        let result = engine.record_completion(&again).unwrap();
        assert!(result.completed_quests.is_empty());
        assert_eq!(hard_quest(&engine), done);
        assert_eq!(engine.state().progress.xp, 110);

        let persisted = fx
            .store
            .quest_get_current_week("2026-01-05")
            .unwrap()
            .into_iter()
            .find(|q| q.quest_type == QuestType::CompleteHard)
            .unwrap();
        assert_eq!(persisted, done);
    }
}

#[test]
fn hundredth_completion_unlocks_all_task_milestones() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        for i in 0..99 {
            let task = Task::new(format!("old {i}"), Column::DoFree, Difficulty::Easy, i)
                .completed(i + 1);
            fx.store.task_create(&task).unwrap();
        }
        let mut engine = fx.engine();
        let task = fx.finish(Column::DoFree, Difficulty::Easy);

        let result = engine.record_completion(&task).unwrap();

        assert_eq!(
            result.new_badges,
            vec![
                BadgeType::FirstTask,
                BadgeType::Tasks10,
                BadgeType::Tasks50,
                BadgeType::Tasks100
            ],
            "[{}]",
            fx.name
        );
        assert_eq!(engine.state().unlocked_badges().count(), 4);
    }
}

#[test]
fn badges_unlock_only_once_across_completions() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        let mut engine = fx.engine();
        let mut seen = Vec::new();
        for _ in 0..12 {
            let task = fx.finish(Column::DoFirst, Difficulty::Easy);
            let result = engine.record_completion(&task).unwrap();
            for badge in result.new_badges {
                assert!(!seen.contains(&badge), "[{}] {badge} twice", fx.name);
                seen.push(badge);
            }
            fx.clock.advance(1_000);
        }
        assert_eq!(seen, vec![BadgeType::FirstTask, BadgeType::Tasks10]);
    }
}

#[test]
fn state_survives_engine_reload() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        let mut engine = fx.engine();
        for difficulty in [Difficulty::Easy, Difficulty::Hard, Difficulty::Medium] {
            let task = fx.finish(Column::DoFirst, difficulty);
            engine.record_completion(&task).unwrap();
            fx.clock.advance(1_000);
        }

        let reloaded = fx.engine();
        assert_eq!(reloaded.state(), engine.state(), "[{}]", fx.name);
    }
}

#[test]
fn new_week_gets_fresh_quests() {
    // Sunday evening, then Monday morning
    for fx in Fixture::all(at("2026-01-11", 21)) {
        let mut engine = fx.engine();
        let hard = fx.finish(Column::DoFirst, Difficulty::Hard);
        engine.record_completion(&hard).unwrap();
        assert!(engine.state().quests.iter().all(|q| q.start_date == "2026-01-05"));

        fx.clock.set(at("2026-01-12", 8));
        let hard = fx.finish(Column::DoFirst, Difficulty::Hard);
        let result = engine.record_completion(&hard).unwrap();

        // Last week's hard quest was done; this week's one completes again
        assert_eq!(result.completed_quests.len(), 1, "[{}]", fx.name);
        assert_eq!(result.completed_quests[0].start_date, "2026-01-12");
        assert!(engine.state().quests.iter().all(|q| q.start_date == "2026-01-12"));
        assert_eq!(engine.state().streak.current, 2);
        assert_eq!(fx.store.quest_get_current_week("2026-01-12").unwrap().len(), 4);
        assert_eq!(fx.store.quest_get_current_week("2026-01-05").unwrap().len(), 4);
    }
}

#[test]
fn completion_log_records_every_completion() {
    for fx in Fixture::all(at(WEDNESDAY, 12)) {
        let mut engine = fx.engine();
        let task = fx.finish(Column::DoLater, Difficulty::Hard);
        engine.record_completion(&task).unwrap();

        let events = fx.store.completion_get_all().unwrap();
        assert_eq!(events.len(), 1, "[{}]", fx.name);
        assert_eq!(events[0].task_id, task.id);
        assert_eq!(events[0].xp_awarded, 30);
        assert_eq!(events[0].id, format!("{}_{}", task.id, at(WEDNESDAY, 12)));
    }
}

#[test]
fn sqlite_state_survives_reopen() {
    use std::sync::Arc;

    use questboard::gamification::ProgressEngine;
    use questboard::store::{SqliteStore, Store};

    let fx = Fixture::sqlite(at(WEDNESDAY, 12));
    let mut engine = fx.engine();
    let task = fx.finish(Column::DoFirst, Difficulty::Hard);
    engine.record_completion(&task).unwrap();

    let path = fx.dir.as_ref().unwrap().path().join("questboard.db");
    let reopened: Arc<dyn Store> = Arc::new(SqliteStore::open(&path).unwrap());
    let again = ProgressEngine::load(reopened, fx.clock.clone()).unwrap();
    assert_eq!(again.state(), engine.state());
    assert_eq!(again.state().progress.xp, 70);
}
