use serde::{Deserialize, Serialize};

use crate::SolutionZone;

/// Score multiplier tier of a [`Level`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    /// Multiplier applied to the raw score when a level is completed.
    #[must_use]
    pub fn score_multiplier(self) -> f32 {
        match self {
            Self::Easy => 1.0,
            Self::Normal => 1.5,
            Self::Hard => 2.0,
            Self::Expert => 3.0,
        }
    }
}

/// A puzzle definition: the hidden zone plus the rules for revealing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    id: u32,
    name: String,
    description: String,
    solution_zone: SolutionZone,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default)]
    time_limit_ms: Option<u64>,
    #[serde(default = "default_min_coverage")]
    min_coverage_required: f32,
    #[serde(default)]
    hints: Vec<String>,
}

fn default_min_coverage() -> f32 {
    Level::DEFAULT_MIN_COVERAGE
}

impl Level {
    /// Coverage a player must reach before a reveal is allowed, unless the
    /// level overrides it.
    pub const DEFAULT_MIN_COVERAGE: f32 = 0.4;

    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        solution_zone: SolutionZone,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            solution_zone,
            difficulty: Difficulty::default(),
            time_limit_ms: None,
            min_coverage_required: Self::DEFAULT_MIN_COVERAGE,
            hints: vec![],
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    #[must_use]
    pub fn with_min_coverage(mut self, min_coverage_required: f32) -> Self {
        self.min_coverage_required = min_coverage_required;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn solution_zone(&self) -> &SolutionZone {
        &self.solution_zone
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn time_limit_ms(&self) -> Option<u64> {
        self.time_limit_ms
    }

    #[must_use]
    pub fn min_coverage_required(&self) -> f32 {
        self.min_coverage_required
    }

    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// The introductory level.
    #[must_use]
    pub fn tutorial() -> Self {
        let zone = SolutionZone::rectangle(0.5, 0.5, 0.2, 0.2)
            .expect("tutorial zone geometry is within the canvas");
        Self::new(
            0,
            "Tutorial",
            "Learn the basics - touch everywhere EXCEPT the hidden zone",
            zone,
        )
        .with_difficulty(Difficulty::Easy)
        .with_min_coverage(0.3)
        .with_hints(["The solution is in the center", "Avoid the middle!"])
    }

    /// The built-in level catalog, in play order.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        let rect = |cx, cy, w, h| {
            SolutionZone::rectangle(cx, cy, w, h)
                .expect("catalog zone geometry is within the canvas")
        };
        let ellipse = |cx, cy, w, h| {
            SolutionZone::ellipse(cx, cy, w, h)
                .expect("catalog zone geometry is within the canvas")
        };

        vec![
            Self::tutorial(),
            Self::new(1, "Corner Secret", "Something hides in a corner", rect(0.1, 0.1, 0.15, 0.15))
                .with_difficulty(Difficulty::Easy)
                .with_min_coverage(0.35)
                .with_hints(["Check the corners"]),
            Self::new(2, "Edge Walker", "The answer lies at the edge", rect(0.5, 0.95, 0.3, 0.08))
                .with_difficulty(Difficulty::Easy)
                .with_min_coverage(0.4)
                .with_hints(["Look at the boundaries"]),
            Self::new(3, "Circle of Mystery", "A round secret awaits", ellipse(0.7, 0.3, 0.2, 0.2))
                .with_difficulty(Difficulty::Normal)
                .with_min_coverage(0.45)
                .with_hints(["Not everything is square"]),
            Self::new(4, "The Thin Line", "A narrow path to victory", rect(0.5, 0.5, 0.05, 0.6))
                .with_difficulty(Difficulty::Normal)
                .with_min_coverage(0.5)
                .with_hints(["Think vertical"]),
            Self::new(5, "Bottom Dweller", "Look down for the answer", rect(0.3, 0.85, 0.25, 0.12))
                .with_difficulty(Difficulty::Normal)
                .with_min_coverage(0.5)
                .with_hints(["Gravity pulls secrets down"]),
            Self::new(6, "Tiny Target", "A small secret in a big space", rect(0.25, 0.6, 0.1, 0.1))
                .with_difficulty(Difficulty::Hard)
                .with_min_coverage(0.55)
                .with_hints(["It's smaller than you think"]),
            Self::new(
                7,
                "Top Secret",
                "Classified at the highest level",
                ellipse(0.8, 0.15, 0.15, 0.15),
            )
            .with_difficulty(Difficulty::Hard)
            .with_min_coverage(0.55)
            .with_hints(["Rise to the occasion"]),
            Self::new(
                8,
                "The Wide Path",
                "A broad secret hides in plain sight",
                rect(0.5, 0.5, 0.6, 0.08),
            )
            .with_difficulty(Difficulty::Hard)
            .with_min_coverage(0.55)
            .with_hints(["Think horizontal"]),
            Self::new(9, "Corner Master", "Master the corners to win", rect(0.9, 0.9, 0.12, 0.12))
                .with_difficulty(Difficulty::Expert)
                .with_min_coverage(0.6)
                .with_hints(["The last corner is the key"]),
            Self::new(
                10,
                "Final Challenge",
                "The ultimate test of negative space",
                ellipse(0.42, 0.73, 0.08, 0.08),
            )
            .with_difficulty(Difficulty::Expert)
            .with_time_limit_ms(60_000)
            .with_min_coverage(0.65)
            .with_hints(["Trust your instincts", "Time is of the essence"]),
        ]
    }
}
