//! Statistics aggregation - builds per-user snapshots for badge evaluation
//!
//! A snapshot read never fails as a whole: each underlying read that errors
//! is logged and replaced with its zero-value default so a user with no
//! history still evaluates cleanly against the catalog.

use std::collections::BTreeSet;

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use tracing::warn;

use super::db::GamifyDb;
use super::models::{ColoringStatsRow, StreakInfo, UserCounters, UserStatsSnapshot};

/// Daily-activity streak type key in the streaks table.
pub(crate) const STREAK_DAILY: &str = "daily";

/// Read-only statistics aggregator.
#[derive(Clone)]
pub struct StatsReader {
    db: GamifyDb,
}

impl StatsReader {
    pub fn new(db: GamifyDb) -> Self {
        Self { db }
    }

    /// Build the full snapshot for one user.
    ///
    /// Pure read, no side effects. Individual sub-reads that fail are
    /// substituted with zero-value defaults rather than aborting.
    pub fn snapshot(&self, user_id: &str) -> Result<UserStatsSnapshot> {
        let conn = self.db.conn();

        let counters = Self::read_counters(&conn, user_id).unwrap_or_else(|e| {
            warn!("Counter read failed for {}, defaulting to zero: {}", user_id, e);
            UserCounters::default()
        });
        let coloring = Self::read_coloring(&conn, user_id).unwrap_or_else(|e| {
            warn!("Coloring read failed for {}, defaulting to zero: {}", user_id, e);
            ColoringStatsRow::default()
        });
        let daily_streak = Self::read_streak(&conn, user_id, STREAK_DAILY)
            .map(|s| s.current)
            .unwrap_or_else(|e| {
                warn!("Streak read failed for {}, defaulting to zero: {}", user_id, e);
                0
            });

        Ok(UserStatsSnapshot {
            analyses_completed: counters.analyses_completed,
            stories_completed: counters.stories_completed,
            coloring_pages_generated: counters.coloring_pages_generated,
            distinct_test_types: counters.test_types.len() as u32,
            child_profiles: counters.child_profiles,
            profile_complete: counters.profile_complete,
            daily_streak,

            coloring_completed: coloring.completed,
            total_colors_used: coloring.colors_used.len() as u32,
            max_colors_in_artwork: coloring.max_colors,
            distinct_brushes: coloring.brushes_used.len() as u32,
            distinct_premium_brushes: coloring.premium_brushes_used.len() as u32,
            assistive_uses: coloring.assistive_uses,
            coloring_streak: coloring.current_streak,
            coloring_minutes: coloring.total_minutes,
            quick_sessions: coloring.quick_sessions,
            marathon_sessions: coloring.marathon_sessions,
            undo_then_continue: coloring.undo_then_continue,
        })
    }

    /// The daily-activity streak for display.
    pub fn daily_streak(&self, user_id: &str) -> Result<StreakInfo> {
        let conn = self.db.conn();
        Self::read_streak(&conn, user_id, STREAK_DAILY)
    }

    pub(crate) fn read_counters(conn: &Connection, user_id: &str) -> Result<UserCounters> {
        let row = conn
            .query_row(
                r#"SELECT analyses_completed, stories_completed, coloring_pages_generated,
                          test_types, child_profiles, profile_complete
                   FROM user_counters WHERE user_id = ?1"#,
                [user_id],
                |r| {
                    Ok((
                        r.get::<_, u32>(0)?,
                        r.get::<_, u32>(1)?,
                        r.get::<_, u32>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, u32>(4)?,
                        r.get::<_, bool>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((analyses, stories, pages, test_types, profiles, complete)) = row else {
            return Ok(UserCounters::default());
        };

        Ok(UserCounters {
            analyses_completed: analyses,
            stories_completed: stories,
            coloring_pages_generated: pages,
            test_types: parse_set(&test_types),
            child_profiles: profiles,
            profile_complete: complete,
        })
    }

    pub(crate) fn read_coloring(conn: &Connection, user_id: &str) -> Result<ColoringStatsRow> {
        let row = conn
            .query_row(
                r#"SELECT completed, colors_used, max_colors, brushes_used, premium_brushes_used,
                          assistive_uses, undo_then_continue, total_minutes,
                          quick_sessions, marathon_sessions,
                          current_streak, best_streak, last_coloring_day
                   FROM coloring_stats WHERE user_id = ?1"#,
                [user_id],
                |r| {
                    Ok(ColoringStatsRow {
                        completed: r.get(0)?,
                        colors_used: parse_set(&r.get::<_, String>(1)?),
                        max_colors: r.get(2)?,
                        brushes_used: parse_set(&r.get::<_, String>(3)?),
                        premium_brushes_used: parse_set(&r.get::<_, String>(4)?),
                        assistive_uses: r.get(5)?,
                        undo_then_continue: r.get(6)?,
                        total_minutes: r.get(7)?,
                        quick_sessions: r.get(8)?,
                        marathon_sessions: r.get(9)?,
                        current_streak: r.get(10)?,
                        best_streak: r.get(11)?,
                        last_coloring_day: r.get(12)?,
                    })
                },
            )
            .optional()?;

        Ok(row.unwrap_or_default())
    }

    pub(crate) fn read_streak(
        conn: &Connection,
        user_id: &str,
        streak_type: &str,
    ) -> Result<StreakInfo> {
        let row = conn
            .query_row(
                r#"SELECT current_count, best_count, last_activity_day
                   FROM streaks WHERE user_id = ?1 AND streak_type = ?2"#,
                [user_id, streak_type],
                |r| {
                    Ok(StreakInfo {
                        current: r.get(0)?,
                        best: r.get(1)?,
                        last_activity_day: r.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(row.unwrap_or_default())
    }
}

/// Parse a JSON-array column into a set, tolerating malformed values.
fn parse_set(json: &str) -> BTreeSet<String> {
    serde_json::from_str(json).unwrap_or_else(|e| {
        warn!("Malformed set column {:?}: {}", json, e);
        BTreeSet::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state_snapshot_for_new_user() {
        let db = GamifyDb::open_in_memory().unwrap();
        let reader = StatsReader::new(db);

        let snap = reader.snapshot("brand-new-user").unwrap();
        assert_eq!(snap, UserStatsSnapshot::default());
    }

    #[test]
    fn test_parse_set_tolerates_garbage() {
        assert!(parse_set("not json").is_empty());
        assert_eq!(parse_set(r#"["red","blue"]"#).len(), 2);
    }
}
