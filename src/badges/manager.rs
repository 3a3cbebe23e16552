//! Badge manager - evaluation, idempotent awards, and progress
//!
//! Owns all SQL against the `awarded_badges` table. Awards are idempotent
//! through the `(user_id, badge_id)` primary key: insertion conflicts read
//! as "already owned" and are never reported as new unlocks, which also
//! makes the award path safe when two evaluations for the same user race.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::calendar::{calendar_date_badge, time_of_day_badges, weekend_first_day};
use super::checker::{is_satisfied, snapshot_value};
use super::definitions::{BADGES, BadgeDefinition, BadgeId};
use crate::clock::{Clock, day_string, month_day_string};
use crate::stats::{ActionType, AwardOutcome, AwardedBadge, GamifyDb, StatsReader};

/// Result of one evaluation pass.
#[derive(Debug, Default)]
pub struct AwardReport {
    /// Badges awarded by this call, in catalog order
    pub newly_awarded: Vec<&'static BadgeDefinition>,
    /// Everything the user owns after this call
    pub all_owned: Vec<&'static BadgeDefinition>,
}

/// One entry in the "badges near completion" listing.
#[derive(Debug, Clone)]
pub struct BadgeProgress {
    pub badge: &'static BadgeDefinition,
    pub current: u32,
    pub target: u32,
    /// 0-99; fully satisfied badges are awarded instead of listed
    pub percentage: u32,
}

/// Evaluates the badge catalog and performs awards.
#[derive(Clone)]
pub struct BadgeManager {
    db: GamifyDb,
    clock: Arc<dyn Clock>,
    reader: StatsReader,
}

impl BadgeManager {
    pub fn new(db: GamifyDb, clock: Arc<dyn Clock>) -> Self {
        let reader = StatsReader::new(db.clone());
        Self { db, clock, reader }
    }

    /// Get all owned badges with unlock timestamps
    pub fn owned(&self, user_id: &str) -> Result<Vec<AwardedBadge>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT badge_id, unlocked_at FROM awarded_badges WHERE user_id = ?1 ORDER BY unlocked_at",
        )?;
        let badges: Vec<AwardedBadge> = stmt
            .query_map([user_id], |row| {
                Ok(AwardedBadge {
                    badge_id: row.get(0)?,
                    unlocked_at: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(badges)
    }

    /// Get all owned badge IDs
    pub fn owned_ids(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self.owned(user_id)?.into_iter().map(|b| b.badge_id).collect())
    }

    /// Get count of owned badges
    pub fn owned_count(&self, user_id: &str) -> Result<usize> {
        let conn = self.db.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM awarded_badges WHERE user_id = ?1",
            [user_id],
            |r| r.get(0),
        )?;
        Ok(count as usize)
    }

    /// Award a badge, ignoring uniqueness conflicts.
    ///
    /// A conflict means the badge was already owned; that is the expected
    /// outcome of re-triggered checks, not an error.
    pub fn award(&self, user_id: &str, id: BadgeId) -> Result<AwardOutcome> {
        let now = self.clock.now_ms();
        let conn = self.db.conn();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO awarded_badges (user_id, badge_id, unlocked_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![user_id, id.as_str(), now],
        )?;

        if changed > 0 {
            debug!("Unlocked badge {} for {}", id.as_str(), user_id);
            Ok(AwardOutcome::Inserted)
        } else {
            Ok(AwardOutcome::AlreadyOwned)
        }
    }

    /// Evaluate every threshold badge against the user's current snapshot
    /// and award the newly satisfied ones.
    ///
    /// Calendar/time-window badges are skipped here; they are awarded by
    /// [`Self::check_write_time`] as activity is recorded.
    pub fn evaluate_and_award(&self, user_id: &str) -> Result<AwardReport> {
        let owned_ids = self.owned_ids(user_id)?;
        let snapshot = self.reader.snapshot(user_id)?;

        let mut newly_awarded = Vec::new();
        for badge in BADGES {
            if owned_ids.iter().any(|id| id == badge.id.as_str()) {
                continue;
            }
            if !is_satisfied(&badge.requirement, &snapshot) {
                continue;
            }
            // Only a real insert counts as new; a concurrent winner keeps it
            if self.award(user_id, badge.id)? == AwardOutcome::Inserted {
                newly_awarded.push(badge);
            }
        }

        let mut all_owned: Vec<&'static BadgeDefinition> = owned_ids
            .iter()
            .filter_map(|id| BadgeId::from_str(id))
            .map(BadgeDefinition::get)
            .collect();
        all_owned.extend(&newly_awarded);

        Ok(AwardReport {
            newly_awarded,
            all_owned,
        })
    }

    /// Run the write-time checks for one recorded action.
    ///
    /// Returns the badges this call actually unlocked.
    pub fn check_write_time(
        &self,
        user_id: &str,
        action: ActionType,
    ) -> Result<Vec<&'static BadgeDefinition>> {
        let now = self.clock.now();
        let today = now.date_naive();
        let coloring = action == ActionType::ColoringPage;

        let mut candidates = time_of_day_badges(self.clock.hour(), coloring);

        if let Some(id) = calendar_date_badge(&month_day_string(today)) {
            candidates.push(id);
        }

        if let Some(first_day) = weekend_first_day(today) {
            if self.has_activity_on(user_id, &day_string(first_day))? {
                candidates.push(BadgeId::WeekendArtist);
            }
        }

        let mut newly_awarded = Vec::new();
        for id in candidates {
            if self.award(user_id, id)? == AwardOutcome::Inserted {
                newly_awarded.push(BadgeDefinition::get(id));
            }
        }
        Ok(newly_awarded)
    }

    /// Ranked progress toward unowned, non-secret threshold badges.
    ///
    /// Fully satisfied badges are omitted - they belong in
    /// [`Self::evaluate_and_award`], not a "99%" listing. Sorted closest to
    /// completion first; ties keep catalog order.
    pub fn progress(&self, user_id: &str) -> Result<Vec<BadgeProgress>> {
        let owned_ids = self.owned_ids(user_id)?;
        let snapshot = self.reader.snapshot(user_id)?;

        let mut entries: Vec<BadgeProgress> = BADGES
            .iter()
            .filter(|b| !b.secret)
            .filter(|b| !owned_ids.iter().any(|id| id == b.id.as_str()))
            .filter_map(|b| {
                let current = snapshot_value(b.requirement.kind, &snapshot)?;
                let target = b.requirement.threshold;
                if target == 0 || current >= target {
                    return None;
                }
                let percentage =
                    ((f64::from(current) / f64::from(target)) * 100.0).round() as u32;
                Some(BadgeProgress {
                    badge: b,
                    current,
                    target,
                    percentage,
                })
            })
            .collect();

        // Stable sort keeps catalog order within equal percentages
        entries.sort_by(|a, b| b.percentage.cmp(&a.percentage));
        Ok(entries)
    }
}

impl BadgeManager {
    fn has_activity_on(&self, user_id: &str, day: &str) -> Result<bool> {
        let conn = self.db.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM activity_days WHERE user_id = ?1 AND day = ?2",
            [user_id, day],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }
}
