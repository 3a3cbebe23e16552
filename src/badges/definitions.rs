//! Badge definitions and metadata
//!
//! The whole catalog is static: every badge, its rarity, and its unlock
//! requirement live here. Requirement kinds form a tagged union with an
//! explicit `Unknown` fallback so a catalog shipped ahead of the engine
//! never breaks evaluation - unknown kinds simply stay unsatisfied.

/// Unique identifier for each badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeId {
    // Analysis milestones
    FirstAnalysis,
    TenAnalyses,
    FiftyAnalyses,
    HundredAnalyses,

    // Story milestones
    FirstStory,
    TenStories,
    FiftyStories,

    // Coloring-page generation milestones
    FirstColoringPage,
    TenColoringPages,

    // Profile badges
    TestExplorer,
    FirstChildProfile,
    FullHouse,
    AllAboutYou,

    // Daily streaks
    Streak3,
    Streak7,
    Streak30,

    // Coloring badges
    ColoringFirst,
    ColoringTwentyFive,
    RainbowCollector,
    FullPalette,
    BrushExplorer,
    PremiumArtist,
    HelpingHand,
    ColoringStreak5,
    PatientPainter,
    QuickDraw,
    MarathonArtist,
    SecondThoughts,

    // Time-of-day badges
    NightOwl,
    EarlyBird,
    MidnightMuse,
    DawnPalette,
    EveningGlow,

    // Calendar badges
    WorldArtDay,
    ChildrensDay,
    NewYearDoodle,
    WeekendArtist,
}

impl BadgeId {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstAnalysis => "first_analysis",
            Self::TenAnalyses => "ten_analyses",
            Self::FiftyAnalyses => "fifty_analyses",
            Self::HundredAnalyses => "hundred_analyses",
            Self::FirstStory => "first_story",
            Self::TenStories => "ten_stories",
            Self::FiftyStories => "fifty_stories",
            Self::FirstColoringPage => "first_coloring_page",
            Self::TenColoringPages => "ten_coloring_pages",
            Self::TestExplorer => "test_explorer",
            Self::FirstChildProfile => "first_child_profile",
            Self::FullHouse => "full_house",
            Self::AllAboutYou => "all_about_you",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
            Self::ColoringFirst => "coloring_first",
            Self::ColoringTwentyFive => "coloring_twenty_five",
            Self::RainbowCollector => "rainbow_collector",
            Self::FullPalette => "full_palette",
            Self::BrushExplorer => "brush_explorer",
            Self::PremiumArtist => "premium_artist",
            Self::HelpingHand => "helping_hand",
            Self::ColoringStreak5 => "coloring_streak_5",
            Self::PatientPainter => "patient_painter",
            Self::QuickDraw => "quick_draw",
            Self::MarathonArtist => "marathon_artist",
            Self::SecondThoughts => "second_thoughts",
            Self::NightOwl => "night_owl",
            Self::EarlyBird => "early_bird",
            Self::MidnightMuse => "midnight_muse",
            Self::DawnPalette => "dawn_palette",
            Self::EveningGlow => "evening_glow",
            Self::WorldArtDay => "world_art_day",
            Self::ChildrensDay => "childrens_day",
            Self::NewYearDoodle => "new_year_doodle",
            Self::WeekendArtist => "weekend_artist",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        BADGES
            .iter()
            .find(|b| b.id.as_str() == s)
            .map(|b| b.id)
    }
}

/// Badge category for grouping in UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCategory {
    Analysis,
    Story,
    Coloring,
    Profile,
    Streak,
    Time,
    Special,
}

impl BadgeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "Analyses",
            Self::Story => "Stories",
            Self::Coloring => "Coloring",
            Self::Profile => "Profile",
            Self::Streak => "Streaks",
            Self::Time => "Time",
            Self::Special => "Special",
        }
    }
}

/// Badge rarity, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

/// What a badge requirement compares against.
///
/// Threshold kinds read one snapshot field; calendar and time-window kinds
/// depend on *when* the check runs and are only evaluated on the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    // Counter thresholds
    AnalysesCompleted,
    StoriesCompleted,
    ColoringPagesGenerated,
    DistinctTestTypes,
    ChildProfiles,
    ProfileComplete,
    DailyStreak,
    ColoringCompleted,
    TotalColorsUsed,
    MaxColorsInArtwork,
    DistinctBrushes,
    DistinctPremiumBrushes,
    AssistiveUses,
    ColoringStreak,
    ColoringMinutes,
    QuickSessions,
    MarathonSessions,
    UndoThenContinue,

    // Time-of-day windows (write-time only)
    NightWindow,
    DawnWindow,
    ColoringMidnight,
    ColoringDawn,
    ColoringEvening,

    // Calendar (write-time only)
    CalendarDate,
    WeekendBothDays,

    /// Forward-compatibility fallback: never satisfied.
    Unknown,
}

impl RequirementKind {
    /// True for kinds evaluated at write time rather than against a snapshot.
    pub fn is_calendar(&self) -> bool {
        matches!(
            self,
            Self::NightWindow
                | Self::DawnWindow
                | Self::ColoringMidnight
                | Self::ColoringDawn
                | Self::ColoringEvening
                | Self::CalendarDate
                | Self::WeekendBothDays
        )
    }
}

/// Unlock requirement: a kind plus a threshold.
///
/// Calendar/time-window kinds ignore the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub kind: RequirementKind,
    pub threshold: u32,
}

impl Requirement {
    pub const fn at_least(kind: RequirementKind, threshold: u32) -> Self {
        Self { kind, threshold }
    }

    pub const fn on_event(kind: RequirementKind) -> Self {
        Self { kind, threshold: 0 }
    }
}

/// Badge definition with all metadata
#[derive(Debug)]
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: BadgeCategory,
    pub rarity: Rarity,
    pub requirement: Requirement,
    /// Secret badges never appear in progress listings
    pub secret: bool,
}

/// All badge definitions
pub static BADGES: &[BadgeDefinition] = &[
    // === ANALYSES ===
    BadgeDefinition {
        id: BadgeId::FirstAnalysis,
        name: "First Look",
        description: "Analyze your first drawing",
        icon: "🔍",
        category: BadgeCategory::Analysis,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::AnalysesCompleted, 1),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::TenAnalyses,
        name: "Curious Mind",
        description: "Analyze 10 drawings",
        icon: "🧠",
        category: BadgeCategory::Analysis,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::AnalysesCompleted, 10),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::FiftyAnalyses,
        name: "Art Detective",
        description: "Analyze 50 drawings",
        icon: "🕵️",
        category: BadgeCategory::Analysis,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::AnalysesCompleted, 50),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::HundredAnalyses,
        name: "Gallery Curator",
        description: "Analyze 100 drawings",
        icon: "🖼️",
        category: BadgeCategory::Analysis,
        rarity: Rarity::Epic,
        requirement: Requirement::at_least(RequirementKind::AnalysesCompleted, 100),
        secret: false,
    },
    // === STORIES ===
    BadgeDefinition {
        id: BadgeId::FirstStory,
        name: "Once Upon a Time",
        description: "Create your first story",
        icon: "📖",
        category: BadgeCategory::Story,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::StoriesCompleted, 1),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::TenStories,
        name: "Storyteller",
        description: "Create 10 stories",
        icon: "✍️",
        category: BadgeCategory::Story,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::StoriesCompleted, 10),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::FiftyStories,
        name: "Author",
        description: "Create 50 stories",
        icon: "📚",
        category: BadgeCategory::Story,
        rarity: Rarity::Epic,
        requirement: Requirement::at_least(RequirementKind::StoriesCompleted, 50),
        secret: false,
    },
    // === COLORING PAGES ===
    BadgeDefinition {
        id: BadgeId::FirstColoringPage,
        name: "Fresh Page",
        description: "Generate your first coloring page",
        icon: "📄",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::ColoringPagesGenerated, 1),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::TenColoringPages,
        name: "Page Factory",
        description: "Generate 10 coloring pages",
        icon: "🖨️",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::ColoringPagesGenerated, 10),
        secret: false,
    },
    // === PROFILE ===
    BadgeDefinition {
        id: BadgeId::TestExplorer,
        name: "Test Explorer",
        description: "Try 3 different analysis test types",
        icon: "🧪",
        category: BadgeCategory::Profile,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::DistinctTestTypes, 3),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::FirstChildProfile,
        name: "Family Album",
        description: "Add your first child profile",
        icon: "👶",
        category: BadgeCategory::Profile,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::ChildProfiles, 1),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::FullHouse,
        name: "Full House",
        description: "Add 3 child profiles",
        icon: "👨‍👩‍👧‍👦",
        category: BadgeCategory::Profile,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::ChildProfiles, 3),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::AllAboutYou,
        name: "All About You",
        description: "Complete your profile",
        icon: "✅",
        category: BadgeCategory::Profile,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::ProfileComplete, 1),
        secret: false,
    },
    // === STREAKS ===
    BadgeDefinition {
        id: BadgeId::Streak3,
        name: "On a Roll",
        description: "Use Scribbly 3 days in a row",
        icon: "🔥",
        category: BadgeCategory::Streak,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::DailyStreak, 3),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::Streak7,
        name: "Week of Wonder",
        description: "Use Scribbly 7 days in a row",
        icon: "📅",
        category: BadgeCategory::Streak,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::DailyStreak, 7),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::Streak30,
        name: "Monthly Master",
        description: "Use Scribbly 30 days in a row",
        icon: "👑",
        category: BadgeCategory::Streak,
        rarity: Rarity::Legendary,
        requirement: Requirement::at_least(RequirementKind::DailyStreak, 30),
        secret: false,
    },
    // === COLORING ===
    BadgeDefinition {
        id: BadgeId::ColoringFirst,
        name: "First Masterpiece",
        description: "Finish your first coloring artwork",
        icon: "🎨",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::ColoringCompleted, 1),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::ColoringTwentyFive,
        name: "Prolific Painter",
        description: "Finish 25 coloring artworks",
        icon: "🖌️",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Epic,
        requirement: Requirement::at_least(RequirementKind::ColoringCompleted, 25),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::RainbowCollector,
        name: "Rainbow Collector",
        description: "Use 24 different colors across your artworks",
        icon: "🌈",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::TotalColorsUsed, 24),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::FullPalette,
        name: "Full Palette",
        description: "Use 12 colors in a single artwork",
        icon: "🎭",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::MaxColorsInArtwork, 12),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::BrushExplorer,
        name: "Brush Explorer",
        description: "Try 5 different brush types",
        icon: "🖊️",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::DistinctBrushes, 5),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::PremiumArtist,
        name: "Premium Artist",
        description: "Try 3 premium brushes",
        icon: "💎",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Epic,
        requirement: Requirement::at_least(RequirementKind::DistinctPremiumBrushes, 3),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::HelpingHand,
        name: "Helping Hand",
        description: "Use assistive coloring features 10 times",
        icon: "🤝",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Common,
        requirement: Requirement::at_least(RequirementKind::AssistiveUses, 10),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::ColoringStreak5,
        name: "Color Every Day",
        description: "Color 5 days in a row",
        icon: "🗓️",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::ColoringStreak, 5),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::PatientPainter,
        name: "Patient Painter",
        description: "Spend 2 hours coloring in total",
        icon: "⏳",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::ColoringMinutes, 120),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::QuickDraw,
        name: "Quick Draw",
        description: "Finish 5 sessions in under 5 minutes each",
        icon: "⚡",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::QuickSessions, 5),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::MarathonArtist,
        name: "Marathon Artist",
        description: "Complete 3 sessions of 30 minutes or more",
        icon: "🏃",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Epic,
        requirement: Requirement::at_least(RequirementKind::MarathonSessions, 3),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::SecondThoughts,
        name: "Second Thoughts",
        description: "Undo a stroke and keep going, 5 times",
        icon: "↩️",
        category: BadgeCategory::Coloring,
        rarity: Rarity::Rare,
        requirement: Requirement::at_least(RequirementKind::UndoThenContinue, 5),
        secret: true,
    },
    // === TIME OF DAY ===
    BadgeDefinition {
        id: BadgeId::NightOwl,
        name: "Night Owl",
        description: "Create something between midnight and 4 AM",
        icon: "🦉",
        category: BadgeCategory::Time,
        rarity: Rarity::Rare,
        requirement: Requirement::on_event(RequirementKind::NightWindow),
        secret: true,
    },
    BadgeDefinition {
        id: BadgeId::EarlyBird,
        name: "Early Bird",
        description: "Create something between 4 AM and 6 AM",
        icon: "🐦",
        category: BadgeCategory::Time,
        rarity: Rarity::Rare,
        requirement: Requirement::on_event(RequirementKind::DawnWindow),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::MidnightMuse,
        name: "Midnight Muse",
        description: "Color between midnight and 3 AM",
        icon: "🌙",
        category: BadgeCategory::Time,
        rarity: Rarity::Epic,
        requirement: Requirement::on_event(RequirementKind::ColoringMidnight),
        secret: true,
    },
    BadgeDefinition {
        id: BadgeId::DawnPalette,
        name: "Dawn Palette",
        description: "Color between 5 AM and 7 AM",
        icon: "🌅",
        category: BadgeCategory::Time,
        rarity: Rarity::Rare,
        requirement: Requirement::on_event(RequirementKind::ColoringDawn),
        secret: false,
    },
    BadgeDefinition {
        id: BadgeId::EveningGlow,
        name: "Evening Glow",
        description: "Color between 6 PM and 8 PM",
        icon: "🌆",
        category: BadgeCategory::Time,
        rarity: Rarity::Common,
        requirement: Requirement::on_event(RequirementKind::ColoringEvening),
        secret: false,
    },
    // === CALENDAR ===
    BadgeDefinition {
        id: BadgeId::WorldArtDay,
        name: "World Art Day",
        description: "Create something on April 23rd",
        icon: "🗺️",
        category: BadgeCategory::Special,
        rarity: Rarity::Epic,
        requirement: Requirement::on_event(RequirementKind::CalendarDate),
        secret: true,
    },
    BadgeDefinition {
        id: BadgeId::ChildrensDay,
        name: "Children's Day",
        description: "Create something on June 1st",
        icon: "🎈",
        category: BadgeCategory::Special,
        rarity: Rarity::Epic,
        requirement: Requirement::on_event(RequirementKind::CalendarDate),
        secret: true,
    },
    BadgeDefinition {
        id: BadgeId::NewYearDoodle,
        name: "New Year Doodle",
        description: "Create something on January 1st",
        icon: "🎆",
        category: BadgeCategory::Special,
        rarity: Rarity::Epic,
        requirement: Requirement::on_event(RequirementKind::CalendarDate),
        secret: true,
    },
    BadgeDefinition {
        id: BadgeId::WeekendArtist,
        name: "Weekend Artist",
        description: "Create something on both weekend days",
        icon: "🎪",
        category: BadgeCategory::Special,
        rarity: Rarity::Rare,
        requirement: Requirement::on_event(RequirementKind::WeekendBothDays),
        secret: false,
    },
];

impl BadgeDefinition {
    /// Get badge definition by ID
    pub fn get(id: BadgeId) -> &'static BadgeDefinition {
        BADGES
            .iter()
            .find(|b| b.id == id)
            .expect("All badges should be defined")
    }

    /// Get total number of badges in the catalog
    pub fn total_count() -> usize {
        BADGES.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_badge_ids_are_unique() {
        let mut seen = HashSet::new();
        for badge in BADGES {
            assert!(
                seen.insert(badge.id.as_str()),
                "Duplicate badge id: {}",
                badge.id.as_str()
            );
        }
    }

    #[test]
    fn test_id_string_round_trip() {
        for badge in BADGES {
            assert_eq!(BadgeId::from_str(badge.id.as_str()), Some(badge.id));
        }
        assert_eq!(BadgeId::from_str("no_such_badge"), None);
    }

    #[test]
    fn test_every_id_has_a_definition() {
        for badge in BADGES {
            assert_eq!(BadgeDefinition::get(badge.id).id, badge.id);
        }
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }
}
