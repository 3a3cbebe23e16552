//! End-to-end tests for the gamification engine against a real database file.

use std::sync::Arc;

use chrono::{Duration, Local, TimeZone};
use tempfile::tempdir;

use scribbly_core::stats::GamifyDb;
use scribbly_core::{
    ActionType, BadgeId, ColoringActivity, Gamification, ManualClock,
};

fn gamify_at(db: GamifyDb, y: i32, m: u32, d: u32, h: u32) -> (Gamification, ManualClock) {
    let clock = ManualClock::new(Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap());
    (Gamification::from_db(db, Arc::new(clock.clone())), clock)
}

#[test]
fn zero_state_user_awards_nothing() {
    let db = GamifyDb::open_in_memory().unwrap();
    let (mut gamify, _) = gamify_at(db, 2026, 3, 10, 14);

    let snap = gamify.snapshot("nobody").unwrap();
    assert_eq!(snap, Default::default());

    let report = gamify.evaluate_and_award("nobody").unwrap();
    assert!(report.newly_awarded.is_empty());
    assert!(report.all_owned.is_empty());
}

#[test]
fn awards_survive_reopening_the_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gamify.db");

    {
        let db = GamifyDb::open(&path).unwrap();
        let (mut gamify, _) = gamify_at(db, 2026, 3, 10, 14);
        let unlocked = gamify.record_activity("u", ActionType::Analysis).unwrap();
        assert!(unlocked.iter().any(|b| b.id == BadgeId::FirstAnalysis));
    }

    // A fresh session sees the award and does not re-report it
    let db = GamifyDb::open(&path).unwrap();
    let (mut gamify, _) = gamify_at(db, 2026, 3, 10, 18);
    let again = gamify.record_activity("u", ActionType::Analysis).unwrap();
    assert!(again.iter().all(|b| b.id != BadgeId::FirstAnalysis));

    let owned = gamify.owned("u").unwrap();
    assert_eq!(
        owned
            .iter()
            .filter(|b| b.badge_id == "first_analysis")
            .count(),
        1
    );
}

#[test]
fn three_day_streak_unlocks_badge() {
    let db = GamifyDb::open_in_memory().unwrap();
    let (mut gamify, clock) = gamify_at(db, 2026, 3, 9, 14);

    gamify.record_activity("u", ActionType::Analysis).unwrap();
    clock.advance(Duration::days(1));
    gamify.record_activity("u", ActionType::Analysis).unwrap();
    clock.advance(Duration::days(1));
    let unlocked = gamify.record_activity("u", ActionType::Analysis).unwrap();

    assert!(unlocked.iter().any(|b| b.id == BadgeId::Streak3));
    assert_eq!(gamify.snapshot("u").unwrap().daily_streak, 3);
}

#[test]
fn calendar_badge_awarded_once_per_user() {
    let db = GamifyDb::open_in_memory().unwrap();
    let (mut gamify, _) = gamify_at(db, 2026, 4, 23, 10);

    let first = gamify.record_activity("u", ActionType::Story).unwrap();
    assert!(first.iter().any(|b| b.id == BadgeId::WorldArtDay));

    // Several more actions the same day never re-award it
    for _ in 0..3 {
        let more = gamify.record_activity("u", ActionType::Story).unwrap();
        assert!(more.iter().all(|b| b.id != BadgeId::WorldArtDay));
    }
    let owned = gamify.owned("u").unwrap();
    assert_eq!(
        owned
            .iter()
            .filter(|b| b.badge_id == "world_art_day")
            .count(),
        1
    );
}

#[test]
fn coloring_pipeline_unlocks_and_celebrates() {
    let db = GamifyDb::open_in_memory().unwrap();
    let (mut gamify, _) = gamify_at(db, 2026, 3, 10, 19);

    let activity = ColoringActivity {
        completed: true,
        colors_used: vec!["red".into(), "gold".into()],
        brushes_used: vec!["crayon".into()],
        duration_minutes: 12,
        ..Default::default()
    };
    let unlocked = gamify.record_coloring("u", &activity).unwrap();

    // 7 PM coloring hits the evening window; the finished artwork unlocks
    // the first-masterpiece badge
    assert!(unlocked.iter().any(|b| b.id == BadgeId::EveningGlow));
    assert!(unlocked.iter().any(|b| b.id == BadgeId::ColoringFirst));

    let scheduler = gamify.scheduler_mut();
    scheduler.tick();
    assert!(scheduler.is_displaying());
    assert_eq!(scheduler.pending_len(), unlocked.len() - 1);
}

#[test]
fn progress_ranks_closest_first_and_hides_secrets() {
    let db = GamifyDb::open_in_memory().unwrap();
    let (mut gamify, _) = gamify_at(db, 2026, 3, 10, 14);

    for _ in 0..8 {
        gamify.record_activity("u", ActionType::Analysis).unwrap();
    }
    gamify.record_activity("u", ActionType::Story).unwrap();

    let progress = gamify.progress("u").unwrap();
    assert!(!progress.is_empty());

    // Sorted by descending completion
    for pair in progress.windows(2) {
        assert!(pair[0].percentage >= pair[1].percentage);
    }
    // 8/10 analyses is the closest unowned badge
    assert_eq!(progress[0].badge.id, BadgeId::TenAnalyses);
    assert_eq!(progress[0].percentage, 80);

    // No secret badges, no already-satisfied entries
    for entry in &progress {
        assert!(!entry.badge.secret);
        assert!(entry.current < entry.target);
    }
}

#[test]
fn snapshot_reflects_recorded_activity() {
    let db = GamifyDb::open_in_memory().unwrap();
    let (mut gamify, _) = gamify_at(db, 2026, 3, 10, 14);

    gamify.record_activity("u", ActionType::Analysis).unwrap();
    gamify.record_activity("u", ActionType::ColoringPage).unwrap();
    gamify.recorder().record_test_type("u", "htp").unwrap();
    gamify.recorder().set_child_profiles("u", 2).unwrap();
    gamify.recorder().set_profile_complete("u", true).unwrap();

    let snap = gamify.snapshot("u").unwrap();
    assert_eq!(snap.analyses_completed, 1);
    assert_eq!(snap.coloring_pages_generated, 1);
    assert_eq!(snap.distinct_test_types, 1);
    assert_eq!(snap.child_profiles, 2);
    assert!(snap.profile_complete);

    // Profile counters unlock their badges on the next evaluation
    let report = gamify.evaluate_and_award("u").unwrap();
    let ids: Vec<BadgeId> = report.newly_awarded.iter().map(|b| b.id).collect();
    assert!(ids.contains(&BadgeId::FirstChildProfile));
    assert!(ids.contains(&BadgeId::AllAboutYou));
}
