//! Write-time badge checks: time-of-day windows, fixed dates, weekends
//!
//! These cannot be expressed as snapshot thresholds - they fire based on
//! the local time of the action being recorded. Every check is idempotent
//! because awarding an already-owned badge is a storage-level no-op.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;

use super::definitions::BadgeId;

/// Fixed calendar dates, local time, as "MM-DD".
static CALENDAR_BADGES: Lazy<HashMap<&'static str, BadgeId>> = Lazy::new(|| {
    HashMap::from([
        ("04-23", BadgeId::WorldArtDay),
        ("06-01", BadgeId::ChildrensDay),
        ("01-01", BadgeId::NewYearDoodle),
    ])
});

/// Badges triggered by the local hour of the recorded action.
///
/// The coloring-specific windows only apply when the action came from the
/// coloring feature.
pub fn time_of_day_badges(hour: u32, coloring: bool) -> Vec<BadgeId> {
    let mut ids = Vec::new();

    // Generic windows: midnight-4 and 4-6
    if hour < 4 {
        ids.push(BadgeId::NightOwl);
    }
    if (4..6).contains(&hour) {
        ids.push(BadgeId::EarlyBird);
    }

    if coloring {
        if hour < 3 {
            ids.push(BadgeId::MidnightMuse);
        }
        if (5..7).contains(&hour) {
            ids.push(BadgeId::DawnPalette);
        }
        if (18..20).contains(&hour) {
            ids.push(BadgeId::EveningGlow);
        }
    }

    ids
}

/// Badge for today's fixed calendar date, if any.
pub fn calendar_date_badge(month_day: &str) -> Option<BadgeId> {
    CALENDAR_BADGES.get(month_day).copied()
}

/// If today is the second weekend day, the date of the first.
///
/// The weekend is Saturday + Sunday; recording on Sunday completes it when
/// a Saturday activity record exists.
pub fn weekend_first_day(today: NaiveDate) -> Option<NaiveDate> {
    if today.weekday() == Weekday::Sun {
        today.pred_opt()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_time_windows() {
        assert_eq!(time_of_day_badges(2, false), vec![BadgeId::NightOwl]);
        assert_eq!(time_of_day_badges(4, false), vec![BadgeId::EarlyBird]);
        assert_eq!(time_of_day_badges(5, false), vec![BadgeId::EarlyBird]);
        assert!(time_of_day_badges(6, false).is_empty());
        assert!(time_of_day_badges(12, false).is_empty());
    }

    #[test]
    fn test_coloring_time_windows() {
        // 2 AM coloring hits both the generic and the coloring window
        assert_eq!(
            time_of_day_badges(2, true),
            vec![BadgeId::NightOwl, BadgeId::MidnightMuse]
        );
        assert_eq!(
            time_of_day_badges(5, true),
            vec![BadgeId::EarlyBird, BadgeId::DawnPalette]
        );
        assert_eq!(time_of_day_badges(19, true), vec![BadgeId::EveningGlow]);
        assert!(time_of_day_badges(20, true).is_empty());
    }

    #[test]
    fn test_calendar_date_badges() {
        assert_eq!(calendar_date_badge("04-23"), Some(BadgeId::WorldArtDay));
        assert_eq!(calendar_date_badge("06-01"), Some(BadgeId::ChildrensDay));
        assert_eq!(calendar_date_badge("01-01"), Some(BadgeId::NewYearDoodle));
        assert_eq!(calendar_date_badge("02-29"), None);
    }

    #[test]
    fn test_weekend_first_day() {
        // 2026-03-01 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(
            weekend_first_day(sunday),
            Some(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap())
        );

        // Saturday is the first weekend day, not the second
        let saturday = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(weekend_first_day(saturday), None);

        let tuesday = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        assert_eq!(weekend_first_day(tuesday), None);
    }
}
