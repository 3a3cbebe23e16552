//! Activity recorder - the write path for all gamification counters
//!
//! Feature code reports finished actions here. The recorder upserts the
//! per-day activity row, maintains lifetime counters, and applies the
//! calendar-day streak rules. Distinct-value counters use set-union
//! semantics: re-recording a value a user has already used never inflates
//! the count.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use tracing::debug;

use super::db::GamifyDb;
use super::models::{ActionType, ActivityRecord, ColoringActivity};
use super::snapshot::{STREAK_DAILY, StatsReader};
use crate::clock::{Clock, day_string};

/// Sessions shorter than this count as "quick" (minutes).
const QUICK_SESSION_MAX_MINUTES: u32 = 5;
/// Sessions at least this long count as "marathon" (minutes).
const MARATHON_SESSION_MIN_MINUTES: u32 = 30;

/// Records activity to the database.
#[derive(Clone)]
pub struct ActivityRecorder {
    db: GamifyDb,
    clock: Arc<dyn Clock>,
}

impl ActivityRecorder {
    pub fn new(db: GamifyDb, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Record one finished action for today.
    ///
    /// Creates today's activity row (with `first_activity_at = now`) if
    /// absent, otherwise increments the matching counter. Also bumps the
    /// lifetime counter and extends the daily streak.
    ///
    /// Returns the daily streak count if this call extended it.
    pub fn record_activity(&self, user_id: &str, action: ActionType) -> Result<Option<u32>> {
        let now_ms = self.clock.now_ms();
        let day = day_string(self.clock.today());

        let (analyses, stories, pages, edits) = match action {
            ActionType::Analysis => (1, 0, 0, 0),
            ActionType::Story => (0, 1, 0, 0),
            ActionType::ColoringPage => (0, 0, 1, 0),
            ActionType::ProfileEdit => (0, 0, 0, 1),
        };

        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO activity_days
               (user_id, day, analyses, stories, coloring_pages, profile_edits, first_activity_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               ON CONFLICT(user_id, day) DO UPDATE SET
                   analyses = analyses + ?3,
                   stories = stories + ?4,
                   coloring_pages = coloring_pages + ?5,
                   profile_edits = profile_edits + ?6"#,
            rusqlite::params![user_id, day, analyses, stories, pages, edits, now_ms],
        )?;

        // Profile edits have their own explicit counters (set_child_profiles
        // / set_profile_complete); everything else accumulates for life.
        if action != ActionType::ProfileEdit {
            conn.execute(
                r#"INSERT INTO user_counters
                   (user_id, analyses_completed, stories_completed, coloring_pages_generated, updated_at)
                   VALUES (?1, ?2, ?3, ?4, ?5)
                   ON CONFLICT(user_id) DO UPDATE SET
                       analyses_completed = analyses_completed + ?2,
                       stories_completed = stories_completed + ?3,
                       coloring_pages_generated = coloring_pages_generated + ?4,
                       updated_at = ?5"#,
                rusqlite::params![user_id, analyses, stories, pages, now_ms],
            )?;
        }
        drop(conn);

        debug!("Recorded {} for {} on {}", action.as_str(), user_id, day);
        self.update_daily_streak(user_id)
    }

    /// Record one finished coloring session.
    ///
    /// Distinct colors/brushes union into the stored sets; the coloring
    /// streak follows the calendar-day rule (same day unchanged, next day
    /// +1, any gap resets to 1).
    pub fn record_coloring(&self, user_id: &str, activity: &ColoringActivity) -> Result<()> {
        let now_ms = self.clock.now_ms();
        let today = self.clock.today();
        let day = day_string(today);

        let conn = self.db.conn();
        let mut row = StatsReader::read_coloring(&conn, user_id)?;

        row.colors_used
            .extend(activity.colors_used.iter().cloned());
        row.brushes_used
            .extend(activity.brushes_used.iter().cloned());
        row.premium_brushes_used
            .extend(activity.premium_brushes_used.iter().cloned());

        row.max_colors = row.max_colors.max(activity.colors_used.len() as u32);
        row.assistive_uses += activity.assistive_uses;
        row.total_minutes += activity.duration_minutes;
        if activity.completed {
            row.completed += 1;
        }
        if activity.undo_then_continue {
            row.undo_then_continue += 1;
        }
        if activity.duration_minutes > 0 && activity.duration_minutes < QUICK_SESSION_MAX_MINUTES {
            row.quick_sessions += 1;
        }
        if activity.duration_minutes >= MARATHON_SESSION_MIN_MINUTES {
            row.marathon_sessions += 1;
        }

        let last_day = row
            .last_coloring_day
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        if let Some(next) = next_streak_count(last_day, today, row.current_streak) {
            row.current_streak = next;
        }
        row.best_streak = row.best_streak.max(row.current_streak);
        row.last_coloring_day = Some(day);

        conn.execute(
            r#"INSERT INTO coloring_stats
               (user_id, completed, colors_used, max_colors, brushes_used, premium_brushes_used,
                assistive_uses, undo_then_continue, total_minutes, quick_sessions,
                marathon_sessions, current_streak, best_streak, last_coloring_day, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
               ON CONFLICT(user_id) DO UPDATE SET
                   completed = ?2, colors_used = ?3, max_colors = ?4,
                   brushes_used = ?5, premium_brushes_used = ?6,
                   assistive_uses = ?7, undo_then_continue = ?8, total_minutes = ?9,
                   quick_sessions = ?10, marathon_sessions = ?11,
                   current_streak = ?12, best_streak = ?13,
                   last_coloring_day = ?14, updated_at = ?15"#,
            rusqlite::params![
                user_id,
                row.completed,
                serde_json::to_string(&row.colors_used)?,
                row.max_colors,
                serde_json::to_string(&row.brushes_used)?,
                serde_json::to_string(&row.premium_brushes_used)?,
                row.assistive_uses,
                row.undo_then_continue,
                row.total_minutes,
                row.quick_sessions,
                row.marathon_sessions,
                row.current_streak,
                row.best_streak,
                row.last_coloring_day,
                now_ms,
            ],
        )?;

        Ok(())
    }

    /// Union a newly run analysis test type into the distinct-type set.
    pub fn record_test_type(&self, user_id: &str, test_type: &str) -> Result<()> {
        let now_ms = self.clock.now_ms();
        let conn = self.db.conn();
        let mut counters = StatsReader::read_counters(&conn, user_id)?;
        if !counters.test_types.insert(test_type.to_string()) {
            return Ok(()); // already seen, nothing to write
        }
        conn.execute(
            r#"INSERT INTO user_counters (user_id, test_types, updated_at)
               VALUES (?1, ?2, ?3)
               ON CONFLICT(user_id) DO UPDATE SET test_types = ?2, updated_at = ?3"#,
            rusqlite::params![user_id, serde_json::to_string(&counters.test_types)?, now_ms],
        )?;
        Ok(())
    }

    /// Set the current number of child profiles.
    pub fn set_child_profiles(&self, user_id: &str, count: u32) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO user_counters (user_id, child_profiles, updated_at)
               VALUES (?1, ?2, ?3)
               ON CONFLICT(user_id) DO UPDATE SET child_profiles = ?2, updated_at = ?3"#,
            rusqlite::params![user_id, count, self.clock.now_ms()],
        )?;
        Ok(())
    }

    /// Mark the parent profile as fully filled in.
    pub fn set_profile_complete(&self, user_id: &str, complete: bool) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO user_counters (user_id, profile_complete, updated_at)
               VALUES (?1, ?2, ?3)
               ON CONFLICT(user_id) DO UPDATE SET profile_complete = ?2, updated_at = ?3"#,
            rusqlite::params![user_id, complete, self.clock.now_ms()],
        )?;
        Ok(())
    }

    /// Fetch one day's activity row, if any.
    pub fn activity_record(&self, user_id: &str, day: &str) -> Result<Option<ActivityRecord>> {
        let conn = self.db.conn();
        let row = conn
            .query_row(
                r#"SELECT analyses, stories, coloring_pages, profile_edits, first_activity_at
                   FROM activity_days WHERE user_id = ?1 AND day = ?2"#,
                [user_id, day],
                |r| {
                    Ok(ActivityRecord {
                        user_id: user_id.to_string(),
                        day: day.to_string(),
                        analyses: r.get(0)?,
                        stories: r.get(1)?,
                        coloring_pages: r.get(2)?,
                        profile_edits: r.get(3)?,
                        first_activity_at: r.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Extend the daily-activity streak for today.
    ///
    /// Returns the new count if the streak changed, `None` when today was
    /// already counted.
    fn update_daily_streak(&self, user_id: &str) -> Result<Option<u32>> {
        let today = self.clock.today();
        let day = day_string(today);
        let now_ms = self.clock.now_ms();

        let conn = self.db.conn();
        let streak = StatsReader::read_streak(&conn, user_id, STREAK_DAILY)?;

        let last_day = streak
            .last_activity_day
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        let Some(new_count) = next_streak_count(last_day, today, streak.current) else {
            return Ok(None); // already counted today
        };
        let new_best = new_count.max(streak.best);

        conn.execute(
            r#"INSERT INTO streaks
               (user_id, streak_type, current_count, best_count, last_activity_day, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(user_id, streak_type) DO UPDATE SET
                   current_count = ?3, best_count = ?4, last_activity_day = ?5, updated_at = ?6"#,
            rusqlite::params![user_id, STREAK_DAILY, new_count, new_best, day, now_ms],
        )?;

        Ok(Some(new_count))
    }
}

/// The calendar-day streak continuation rule.
///
/// Returns `None` when the streak is unchanged (already counted today),
/// otherwise the new count: exactly one day after the last activity extends
/// the streak, any larger gap (or no prior activity) resets it to 1.
fn next_streak_count(last_day: Option<NaiveDate>, today: NaiveDate, current: u32) -> Option<u32> {
    match last_day {
        Some(last) if last == today => None,
        Some(last) if (today - last).num_days() == 1 => Some(current + 1),
        _ => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, Local, TimeZone};

    fn setup() -> (ActivityRecorder, StatsReader, ManualClock) {
        let db = GamifyDb::open_in_memory().unwrap();
        let clock = ManualClock::new(Local.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap());
        (
            ActivityRecorder::new(db.clone(), Arc::new(clock.clone())),
            StatsReader::new(db),
            clock,
        )
    }

    #[test]
    fn test_next_streak_count_rule() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        // No prior activity starts at 1
        assert_eq!(next_streak_count(None, d(2026, 3, 10), 0), Some(1));
        // Same day does not double-count
        assert_eq!(next_streak_count(Some(d(2026, 3, 10)), d(2026, 3, 10), 4), None);
        // Next day extends
        assert_eq!(next_streak_count(Some(d(2026, 3, 9)), d(2026, 3, 10), 4), Some(5));
        // Gap resets
        assert_eq!(next_streak_count(Some(d(2026, 3, 7)), d(2026, 3, 10), 4), Some(1));
    }

    #[test]
    fn test_daily_streak_continuity() {
        let (recorder, _, clock) = setup();

        assert_eq!(
            recorder.record_activity("u", ActionType::Analysis).unwrap(),
            Some(1)
        );
        // Second action the same day: streak unchanged
        assert_eq!(recorder.record_activity("u", ActionType::Story).unwrap(), None);

        clock.advance(Duration::days(1));
        assert_eq!(
            recorder.record_activity("u", ActionType::Analysis).unwrap(),
            Some(2)
        );

        clock.advance(Duration::days(2));
        assert_eq!(
            recorder.record_activity("u", ActionType::Analysis).unwrap(),
            Some(1)
        );
    }

    #[test]
    fn test_activity_row_upsert() {
        let (recorder, _, clock) = setup();
        recorder.record_activity("u", ActionType::Analysis).unwrap();
        recorder.record_activity("u", ActionType::Analysis).unwrap();
        recorder.record_activity("u", ActionType::ColoringPage).unwrap();

        let day = day_string(clock.today());
        let row = recorder.activity_record("u", &day).unwrap().unwrap();
        assert_eq!(row.analyses, 2);
        assert_eq!(row.coloring_pages, 1);
        assert_eq!(row.stories, 0);

        assert!(recorder.activity_record("u", "1999-01-01").unwrap().is_none());
    }

    #[test]
    fn test_coloring_set_union_is_idempotent() {
        let (recorder, reader, _) = setup();
        let activity = ColoringActivity {
            completed: true,
            colors_used: vec!["red".into(), "blue".into(), "red".into()],
            brushes_used: vec!["crayon".into()],
            duration_minutes: 10,
            ..Default::default()
        };

        recorder.record_coloring("u", &activity).unwrap();
        recorder.record_coloring("u", &activity).unwrap();

        let snap = reader.snapshot("u").unwrap();
        // Re-recording the same colors must not inflate the distinct count
        assert_eq!(snap.total_colors_used, 2);
        assert_eq!(snap.distinct_brushes, 1);
        assert_eq!(snap.max_colors_in_artwork, 2);
        assert_eq!(snap.coloring_completed, 2);
        assert_eq!(snap.coloring_minutes, 20);
    }

    #[test]
    fn test_coloring_streak_rule() {
        let (recorder, reader, clock) = setup();
        let activity = ColoringActivity {
            duration_minutes: 3,
            ..Default::default()
        };

        recorder.record_coloring("u", &activity).unwrap();
        recorder.record_coloring("u", &activity).unwrap();
        assert_eq!(reader.snapshot("u").unwrap().coloring_streak, 1);

        clock.advance(Duration::days(1));
        recorder.record_coloring("u", &activity).unwrap();
        assert_eq!(reader.snapshot("u").unwrap().coloring_streak, 2);

        clock.advance(Duration::days(3));
        recorder.record_coloring("u", &activity).unwrap();
        assert_eq!(reader.snapshot("u").unwrap().coloring_streak, 1);
    }

    #[test]
    fn test_session_duration_buckets() {
        let (recorder, reader, _) = setup();

        let quick = ColoringActivity { duration_minutes: 3, ..Default::default() };
        let marathon = ColoringActivity { duration_minutes: 45, ..Default::default() };
        let plain = ColoringActivity { duration_minutes: 12, ..Default::default() };

        recorder.record_coloring("u", &quick).unwrap();
        recorder.record_coloring("u", &marathon).unwrap();
        recorder.record_coloring("u", &plain).unwrap();

        let snap = reader.snapshot("u").unwrap();
        assert_eq!(snap.quick_sessions, 1);
        assert_eq!(snap.marathon_sessions, 1);
        assert_eq!(snap.coloring_minutes, 60);
    }

    #[test]
    fn test_test_type_union() {
        let (recorder, reader, _) = setup();
        recorder.record_test_type("u", "htp").unwrap();
        recorder.record_test_type("u", "htp").unwrap();
        recorder.record_test_type("u", "family").unwrap();

        assert_eq!(reader.snapshot("u").unwrap().distinct_test_types, 2);
    }
}
