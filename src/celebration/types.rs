//! Celebration event types and their static display configuration

use uuid::Uuid;

/// What kind of reward a celebration announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CelebrationKind {
    BadgeUnlock,
    LevelUp,
    StreakMilestone,
    XpGain,
}

/// How a celebration is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    Inline,
    FullScreen,
}

/// Sound played when a celebration appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Chime,
    Fanfare,
    Sparkle,
}

/// Haptic pattern fired when a celebration appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticPattern {
    Light,
    Medium,
    Success,
}

/// Static per-kind display configuration.
#[derive(Debug, Clone, Copy)]
pub struct CelebrationStyle {
    /// Higher displays first
    pub priority: u8,
    /// Auto-dismiss after this long on screen
    pub duration_ms: u64,
    pub display: DisplayStyle,
    pub confetti: bool,
    pub sound: SoundCue,
    pub haptic: HapticPattern,
}

impl CelebrationKind {
    pub fn style(&self) -> &'static CelebrationStyle {
        match self {
            Self::LevelUp => &CelebrationStyle {
                priority: 5,
                duration_ms: 5000,
                display: DisplayStyle::FullScreen,
                confetti: true,
                sound: SoundCue::Fanfare,
                haptic: HapticPattern::Success,
            },
            Self::BadgeUnlock => &CelebrationStyle {
                priority: 4,
                duration_ms: 4000,
                display: DisplayStyle::FullScreen,
                confetti: true,
                sound: SoundCue::Chime,
                haptic: HapticPattern::Success,
            },
            Self::StreakMilestone => &CelebrationStyle {
                priority: 3,
                duration_ms: 3000,
                display: DisplayStyle::Inline,
                confetti: false,
                sound: SoundCue::Sparkle,
                haptic: HapticPattern::Medium,
            },
            Self::XpGain => &CelebrationStyle {
                priority: 1,
                duration_ms: 2000,
                display: DisplayStyle::Inline,
                confetti: false,
                sound: SoundCue::Sparkle,
                haptic: HapticPattern::Light,
            },
        }
    }
}

/// One reward notification, created at submission and discarded on dismissal.
pub struct CelebrationEvent {
    pub id: Uuid,
    pub kind: CelebrationKind,
    pub title: String,
    pub subtitle: Option<String>,
    /// XP amount, streak length, or similar
    pub value: Option<u32>,
    pub icon: Option<&'static str>,
    /// Invoked exactly once, when the celebration is dismissed
    pub on_dismiss: Option<Box<dyn FnOnce() + Send>>,
}

impl CelebrationEvent {
    pub fn new(kind: CelebrationKind, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            subtitle: None,
            value: None,
            icon: None,
            on_dismiss: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn on_dismiss(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_dismiss = Some(Box::new(f));
        self
    }

    pub fn priority(&self) -> u8 {
        self.kind.style().priority
    }
}

impl std::fmt::Debug for CelebrationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CelebrationEvent")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
