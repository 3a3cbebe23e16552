//! Statistics tracking: storage, the activity write path, and snapshot reads
//!
//! Everything lives in a single SQLite database (`~/.scribbly/gamify.db`).
//! The [`ActivityRecorder`] is the only write surface; [`StatsReader`]
//! produces the immutable [`UserStatsSnapshot`] the badge engine evaluates.

mod db;
mod models;
mod recorder;
mod snapshot;

pub use db::{GamifyDb, StoreError};
pub use models::{
    ActionType, ActivityRecord, AwardOutcome, AwardedBadge, ColoringActivity, ColoringStatsRow,
    StreakInfo, UserCounters, UserStatsSnapshot,
};
pub use recorder::ActivityRecorder;
pub use snapshot::StatsReader;
