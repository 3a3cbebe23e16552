//! Central coordinator for the gamification engine
//!
//! Owns the database, recorder, badge manager, and celebration scheduler,
//! and wires them together: feature code reports an action, badges are
//! checked, and new unlocks land in the celebration queue.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::badges::{AwardReport, BadgeDefinition, BadgeManager, BadgeProgress};
use crate::celebration::{CelebrationEvent, CelebrationKind, CelebrationScheduler};
use crate::clock::{Clock, SystemClock};
use crate::stats::{
    ActionType, ActivityRecorder, AwardedBadge, ColoringActivity, GamifyDb, StatsReader,
    UserStatsSnapshot,
};

/// Facade over the whole gamification engine.
///
/// One instance per app session; all methods run on the app's single
/// logical thread.
pub struct Gamification {
    recorder: ActivityRecorder,
    manager: BadgeManager,
    reader: StatsReader,
    scheduler: CelebrationScheduler,
}

impl Gamification {
    /// Open with the default database location and the system clock.
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(GamifyDb::open_default()?, Arc::new(SystemClock)))
    }

    /// Open with a custom database path.
    pub fn with_path(path: &Path) -> Result<Self> {
        Ok(Self::from_db(GamifyDb::open(path)?, Arc::new(SystemClock)))
    }

    /// Assemble from parts; tests pass an in-memory db and a manual clock.
    pub fn from_db(db: GamifyDb, clock: Arc<dyn Clock>) -> Self {
        Self {
            recorder: ActivityRecorder::new(db.clone(), clock.clone()),
            manager: BadgeManager::new(db.clone(), clock.clone()),
            reader: StatsReader::new(db),
            scheduler: CelebrationScheduler::new(clock),
        }
    }

    /// Report one finished action.
    ///
    /// Records it, runs the write-time and threshold badge checks, queues a
    /// celebration per new unlock, and returns the newly awarded badges. A
    /// failure here leaves the celebration queue untouched; the next
    /// qualifying action re-runs every check.
    pub fn record_activity(
        &mut self,
        user_id: &str,
        action: ActionType,
    ) -> Result<Vec<&'static BadgeDefinition>> {
        let streak = self.recorder.record_activity(user_id, action)?;

        let mut newly_awarded = self.manager.check_write_time(user_id, action)?;
        newly_awarded.extend(self.manager.evaluate_and_award(user_id)?.newly_awarded);

        if let Some(count) = streak {
            if count >= 2 {
                self.scheduler.submit(
                    CelebrationEvent::new(CelebrationKind::StreakMilestone, format!("{count} days in a row!"))
                        .value(count)
                        .icon("🔥"),
                );
            }
        }
        self.celebrate(&newly_awarded);
        Ok(newly_awarded)
    }

    /// Report one finished coloring session.
    pub fn record_coloring(
        &mut self,
        user_id: &str,
        activity: &ColoringActivity,
    ) -> Result<Vec<&'static BadgeDefinition>> {
        self.recorder.record_coloring(user_id, activity)?;

        let mut newly_awarded = self
            .manager
            .check_write_time(user_id, ActionType::ColoringPage)?;
        newly_awarded.extend(self.manager.evaluate_and_award(user_id)?.newly_awarded);

        self.celebrate(&newly_awarded);
        Ok(newly_awarded)
    }

    /// Re-run the threshold pass, e.g. after profile edits.
    pub fn evaluate_and_award(&mut self, user_id: &str) -> Result<AwardReport> {
        let report = self.manager.evaluate_and_award(user_id)?;
        self.celebrate(&report.newly_awarded);
        Ok(report)
    }

    /// Badges near completion, for the progress screen.
    pub fn progress(&self, user_id: &str) -> Result<Vec<BadgeProgress>> {
        self.manager.progress(user_id)
    }

    /// Everything the user owns.
    pub fn owned(&self, user_id: &str) -> Result<Vec<AwardedBadge>> {
        self.manager.owned(user_id)
    }

    /// Current statistics snapshot.
    pub fn snapshot(&self, user_id: &str) -> Result<UserStatsSnapshot> {
        self.reader.snapshot(user_id)
    }

    /// Enqueue an arbitrary reward notification (presentation boundary).
    pub fn submit_celebration(&mut self, event: CelebrationEvent) {
        self.scheduler.submit(event);
    }

    /// The write surface for counters the recorder owns
    /// (test types, child profiles, profile completeness).
    pub fn recorder(&self) -> &ActivityRecorder {
        &self.recorder
    }

    /// Mutable scheduler access for the frame loop (`tick`) and dismissal.
    pub fn scheduler_mut(&mut self) -> &mut CelebrationScheduler {
        &mut self.scheduler
    }

    fn celebrate(&mut self, badges: &[&'static BadgeDefinition]) {
        for badge in badges {
            self.scheduler.submit(
                CelebrationEvent::new(CelebrationKind::BadgeUnlock, badge.name)
                    .subtitle(badge.description)
                    .icon(badge.icon),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Local, TimeZone};

    fn setup() -> Gamification {
        let db = GamifyDb::open_in_memory().unwrap();
        let clock = ManualClock::new(Local.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap());
        Gamification::from_db(db, Arc::new(clock))
    }

    #[test]
    fn test_unlock_queues_celebration() {
        let mut gamify = setup();
        let unlocked = gamify.record_activity("u", ActionType::Analysis).unwrap();
        assert!(unlocked.iter().any(|b| b.id.as_str() == "first_analysis"));

        let scheduler = gamify.scheduler_mut();
        scheduler.tick();
        let current = scheduler.current().unwrap();
        assert_eq!(current.kind, CelebrationKind::BadgeUnlock);
        assert_eq!(current.title, "First Look");
    }

    #[test]
    fn test_repeat_action_reports_no_new_badges() {
        let mut gamify = setup();
        gamify.record_activity("u", ActionType::Story).unwrap();
        let again = gamify.record_activity("u", ActionType::Story).unwrap();
        assert!(again.is_empty());
    }
}
