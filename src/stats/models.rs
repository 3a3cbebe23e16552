//! Data models for activity recording and statistics snapshots

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The kind of content-producing action a feature reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    /// A drawing analysis finished
    Analysis,
    /// A generated story finished
    Story,
    /// A coloring page was generated
    ColoringPage,
    /// A child profile was created or edited
    ProfileEdit,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Story => "story",
            Self::ColoringPage => "coloring_page",
            Self::ProfileEdit => "profile_edit",
        }
    }
}

/// One finished coloring session, as reported by the coloring feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColoringActivity {
    /// Whether the artwork was completed (vs. abandoned)
    pub completed: bool,
    /// Distinct colors used in this artwork
    pub colors_used: Vec<String>,
    /// Brush types used in this session
    pub brushes_used: Vec<String>,
    /// Premium brush types used in this session
    pub premium_brushes_used: Vec<String>,
    /// Session length in whole minutes
    pub duration_minutes: u32,
    /// How many times an assistive feature (fill helper, outline snap) was used
    pub assistive_uses: u32,
    /// The child undid a stroke and kept going
    pub undo_then_continue: bool,
}

/// One row per (user, local calendar date) of recorded activity.
#[derive(Debug, Clone, Default)]
pub struct ActivityRecord {
    pub user_id: String,
    /// Local date as "YYYY-MM-DD"
    pub day: String,
    pub analyses: u32,
    pub stories: u32,
    pub coloring_pages: u32,
    pub profile_edits: u32,
    /// Unix ms of the first activity that day
    pub first_activity_at: i64,
}

/// Raw lifetime counters row. Absent rows read as all zeros.
#[derive(Debug, Clone, Default)]
pub struct UserCounters {
    pub analyses_completed: u32,
    pub stories_completed: u32,
    pub coloring_pages_generated: u32,
    /// Distinct analysis test types ever run, stored as a JSON array
    pub test_types: BTreeSet<String>,
    pub child_profiles: u32,
    pub profile_complete: bool,
}

/// Raw coloring aggregates row. Absent rows read as all zeros.
#[derive(Debug, Clone, Default)]
pub struct ColoringStatsRow {
    pub completed: u32,
    pub colors_used: BTreeSet<String>,
    pub max_colors: u32,
    pub brushes_used: BTreeSet<String>,
    pub premium_brushes_used: BTreeSet<String>,
    pub assistive_uses: u32,
    pub undo_then_continue: u32,
    pub total_minutes: u32,
    pub quick_sessions: u32,
    pub marathon_sessions: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Local date as "YYYY-MM-DD" of the last recorded coloring session
    pub last_coloring_day: Option<String>,
}

/// Immutable per-evaluation aggregate of everything badge requirements
/// compare against. Recomputed on each evaluation, never persisted.
///
/// A brand-new user produces the `Default` snapshot: all zeros and false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStatsSnapshot {
    pub analyses_completed: u32,
    pub stories_completed: u32,
    pub coloring_pages_generated: u32,
    pub distinct_test_types: u32,
    pub child_profiles: u32,
    pub profile_complete: bool,
    pub daily_streak: u32,

    pub coloring_completed: u32,
    pub total_colors_used: u32,
    pub max_colors_in_artwork: u32,
    pub distinct_brushes: u32,
    pub distinct_premium_brushes: u32,
    pub assistive_uses: u32,
    pub coloring_streak: u32,
    pub coloring_minutes: u32,
    pub quick_sessions: u32,
    pub marathon_sessions: u32,
    pub undo_then_continue: u32,
}

/// Current + best count for one streak type.
#[derive(Debug, Clone, Default)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    pub last_activity_day: Option<String>,
}

/// Outcome of a storage-level badge insert.
///
/// A uniqueness conflict is not an error: the badge was already owned and the
/// insert is a benign no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardOutcome {
    Inserted,
    AlreadyOwned,
}

/// A badge a user owns, as stored.
#[derive(Debug, Clone)]
pub struct AwardedBadge {
    pub badge_id: String,
    /// Unix ms
    pub unlocked_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_snapshot_default() {
        let snap = UserStatsSnapshot::default();
        assert_eq!(snap.analyses_completed, 0);
        assert_eq!(snap.coloring_streak, 0);
        assert!(!snap.profile_complete);
    }

    #[test]
    fn test_action_type_str() {
        assert_eq!(ActionType::ColoringPage.as_str(), "coloring_page");
    }
}
