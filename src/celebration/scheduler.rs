//! Celebration scheduler - single-flight display queue
//!
//! One scheduler instance exists per app session. Rewards land in `pending`,
//! sorted by descending priority (submission order within a tier); at most
//! one event is current at a time. Display starts on the next frame-loop
//! poll ([`CelebrationScheduler::tick`]), so a batch submitted between two
//! frames surfaces strictly in priority order; dismissal promotes the next
//! event synchronously. Everything runs on the app's single logical thread,
//! so queue state never needs locking.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::debug;

use super::types::{CelebrationEvent, HapticPattern, SoundCue};
use crate::clock::Clock;

/// Plays the sound/haptic side effects of a newly shown celebration.
///
/// Presentation supplies a real implementation; the default is silent.
pub trait CelebrationEffects: Send {
    fn play_sound(&mut self, cue: SoundCue);
    fn play_haptic(&mut self, pattern: HapticPattern);
}

/// No-op effects sink.
pub struct SilentEffects;

impl CelebrationEffects for SilentEffects {
    fn play_sound(&mut self, _cue: SoundCue) {}
    fn play_haptic(&mut self, _pattern: HapticPattern) {}
}

struct ActiveCelebration {
    event: CelebrationEvent,
    shown_at: DateTime<Local>,
}

/// Process-wide notification queue with single-flight display.
pub struct CelebrationScheduler {
    pending: Vec<CelebrationEvent>,
    current: Option<ActiveCelebration>,
    clock: Arc<dyn Clock>,
    effects: Box<dyn CelebrationEffects>,
}

impl CelebrationScheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_effects(clock, Box::new(SilentEffects))
    }

    pub fn with_effects(clock: Arc<dyn Clock>, effects: Box<dyn CelebrationEffects>) -> Self {
        Self {
            pending: Vec::new(),
            current: None,
            clock,
            effects,
        }
    }

    /// Enqueue a celebration. Display starts on the next [`Self::tick`].
    pub fn submit(&mut self, event: CelebrationEvent) {
        debug!("Celebration queued: {:?} {}", event.kind, event.title);
        self.pending.push(event);
        // Stable sort: equal priorities keep submission order
        self.pending.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Dismiss the current celebration and promote the next pending one.
    ///
    /// Called by the auto-dismiss timer or an explicit user tap - whichever
    /// comes first; the loser finds `current` empty and does nothing.
    pub fn dismiss(&mut self) {
        let Some(mut active) = self.current.take() else {
            return;
        };
        if let Some(on_dismiss) = active.event.on_dismiss.take() {
            on_dismiss();
        }
        self.advance();
    }

    /// Drive the queue: start displaying when idle, auto-dismiss when the
    /// current celebration's duration has elapsed. Call from the frame loop.
    pub fn tick(&mut self) {
        if let Some(active) = &self.current {
            let elapsed_ms = (self.clock.now() - active.shown_at).num_milliseconds();
            if elapsed_ms >= active.event.kind.style().duration_ms as i64 {
                self.dismiss();
            }
            return;
        }
        self.advance();
    }

    /// The celebration currently on screen, if any.
    pub fn current(&self) -> Option<&CelebrationEvent> {
        self.current.as_ref().map(|a| &a.event)
    }

    pub fn is_displaying(&self) -> bool {
        self.current.is_some()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Promote the highest-priority pending event when nothing is showing.
    /// Sound and haptics fire here, exactly once per event.
    fn advance(&mut self) {
        if self.current.is_some() || self.pending.is_empty() {
            return;
        }
        let event = self.pending.remove(0);
        let style = event.kind.style();
        self.effects.play_sound(style.sound);
        self.effects.play_haptic(style.haptic);
        self.current = Some(ActiveCelebration {
            event,
            shown_at: self.clock.now(),
        });
    }
}
