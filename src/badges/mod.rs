//! Achievement engine: badge catalog, requirement checks, and awards

mod calendar;
mod checker;
mod definitions;
mod manager;

pub use calendar::{calendar_date_badge, time_of_day_badges, weekend_first_day};
pub use checker::{is_satisfied, snapshot_value};
pub use definitions::{
    BADGES, BadgeCategory, BadgeDefinition, BadgeId, Rarity, Requirement, RequirementKind,
};
pub use manager::{AwardReport, BadgeManager, BadgeProgress};
