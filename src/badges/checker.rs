//! Badge requirement evaluation against a statistics snapshot
//!
//! Only threshold kinds are decided here. Calendar and time-window kinds
//! always report unsatisfied in this pass - they depend on when the check
//! runs and are handled by the write-time checks in [`super::calendar`].

use super::definitions::{Requirement, RequirementKind};
use crate::stats::UserStatsSnapshot;

/// Read the snapshot field a requirement kind compares against.
///
/// Returns `None` for calendar/time-window kinds and for unknown kinds,
/// which makes both unsatisfiable here and excluded from progress listings.
pub fn snapshot_value(kind: RequirementKind, snap: &UserStatsSnapshot) -> Option<u32> {
    match kind {
        RequirementKind::AnalysesCompleted => Some(snap.analyses_completed),
        RequirementKind::StoriesCompleted => Some(snap.stories_completed),
        RequirementKind::ColoringPagesGenerated => Some(snap.coloring_pages_generated),
        RequirementKind::DistinctTestTypes => Some(snap.distinct_test_types),
        RequirementKind::ChildProfiles => Some(snap.child_profiles),
        RequirementKind::ProfileComplete => Some(u32::from(snap.profile_complete)),
        RequirementKind::DailyStreak => Some(snap.daily_streak),
        RequirementKind::ColoringCompleted => Some(snap.coloring_completed),
        RequirementKind::TotalColorsUsed => Some(snap.total_colors_used),
        RequirementKind::MaxColorsInArtwork => Some(snap.max_colors_in_artwork),
        RequirementKind::DistinctBrushes => Some(snap.distinct_brushes),
        RequirementKind::DistinctPremiumBrushes => Some(snap.distinct_premium_brushes),
        RequirementKind::AssistiveUses => Some(snap.assistive_uses),
        RequirementKind::ColoringStreak => Some(snap.coloring_streak),
        RequirementKind::ColoringMinutes => Some(snap.coloring_minutes),
        RequirementKind::QuickSessions => Some(snap.quick_sessions),
        RequirementKind::MarathonSessions => Some(snap.marathon_sessions),
        RequirementKind::UndoThenContinue => Some(snap.undo_then_continue),

        RequirementKind::NightWindow
        | RequirementKind::DawnWindow
        | RequirementKind::ColoringMidnight
        | RequirementKind::ColoringDawn
        | RequirementKind::ColoringEvening
        | RequirementKind::CalendarDate
        | RequirementKind::WeekendBothDays
        | RequirementKind::Unknown => None,
    }
}

/// Whether a requirement is satisfied by the snapshot.
pub fn is_satisfied(req: &Requirement, snap: &UserStatsSnapshot) -> bool {
    match snapshot_value(req.kind, snap) {
        Some(value) => value >= req.threshold,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::definitions::Requirement;

    #[test]
    fn test_threshold_satisfaction() {
        let snap = UserStatsSnapshot {
            analyses_completed: 10,
            ..Default::default()
        };

        let req = Requirement::at_least(RequirementKind::AnalysesCompleted, 10);
        assert!(is_satisfied(&req, &snap));

        let req = Requirement::at_least(RequirementKind::AnalysesCompleted, 11);
        assert!(!is_satisfied(&req, &snap));
    }

    #[test]
    fn test_profile_complete_as_boolean() {
        let mut snap = UserStatsSnapshot::default();
        let req = Requirement::at_least(RequirementKind::ProfileComplete, 1);
        assert!(!is_satisfied(&req, &snap));

        snap.profile_complete = true;
        assert!(is_satisfied(&req, &snap));
    }

    #[test]
    fn test_calendar_kinds_never_satisfied_here() {
        // Even a maxed-out snapshot leaves write-time kinds unsatisfied
        let snap = UserStatsSnapshot {
            analyses_completed: u32::MAX,
            coloring_completed: u32::MAX,
            ..Default::default()
        };
        for kind in [
            RequirementKind::NightWindow,
            RequirementKind::CalendarDate,
            RequirementKind::WeekendBothDays,
        ] {
            assert!(!is_satisfied(&Requirement::on_event(kind), &snap));
        }
    }

    #[test]
    fn test_unknown_kind_never_satisfied() {
        let snap = UserStatsSnapshot::default();
        let req = Requirement::at_least(RequirementKind::Unknown, 0);
        assert!(!is_satisfied(&req, &snap));
        assert_eq!(snapshot_value(RequirementKind::Unknown, &snap), None);
    }
}
