//! Celebration notifications: event types and the single-flight scheduler

mod scheduler;
mod types;

pub use scheduler::{CelebrationEffects, CelebrationScheduler, SilentEffects};
pub use types::{
    CelebrationEvent, CelebrationKind, CelebrationStyle, DisplayStyle, HapticPattern, SoundCue,
};
