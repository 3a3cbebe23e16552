//! Scribbly Core - Gamification engine for the Scribbly drawing app
//!
//! Scribbly analyzes children's drawings and generates stories and coloring
//! pages from them. This crate is the gamification layer underneath the app:
//! it tracks per-user activity in a SQLite database, evaluates a static badge
//! catalog against accumulated statistics, and schedules the celebration
//! notifications that unlocks trigger.
//!
//! # Architecture
//!
//! ```text
//! feature code ──▶ ActivityRecorder ──▶ BadgeManager ──▶ CelebrationScheduler
//!                        │                   │
//!                        ▼                   ▼
//!                  ~/.scribbly/gamify.db (activity, counters, badges)
//! ```
//!
//! Reads for progress display flow the other way: presentation asks the
//! [`badges::BadgeManager`] for progress, which builds a
//! [`stats::UserStatsSnapshot`] from the stored counters.
//!
//! # Usage
//!
//! ```ignore
//! let mut gamify = Gamification::new()?;
//!
//! // After a drawing analysis completes:
//! let unlocked = gamify.record_activity("user-1", ActionType::Analysis)?;
//!
//! // Poll from the frame loop so finished celebrations advance:
//! gamify.scheduler_mut().tick();
//! ```

pub mod badges;
pub mod celebration;
pub mod clock;
pub mod gamification;
pub mod stats;

pub use badges::{AwardReport, BadgeDefinition, BadgeId, BadgeManager, BadgeProgress, Rarity};
pub use celebration::{CelebrationEvent, CelebrationKind, CelebrationScheduler};
pub use clock::{Clock, ManualClock, SystemClock};
pub use gamification::Gamification;
pub use stats::{ActionType, ActivityRecorder, ColoringActivity, StatsReader, UserStatsSnapshot};
