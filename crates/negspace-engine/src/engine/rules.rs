use crate::{GameSession, GameStatus, Heatmap, Level, TouchPoint};

/// Outcome of feeding one touch into a session.
///
/// Every variant carries the resulting session so callers replace their
/// current aggregate unconditionally.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum TouchOutcome {
    /// The touch landed outside the zone; play continues.
    Success(GameSession),
    /// The touch landed inside the zone; the session has failed.
    ZoneTouched(GameSession),
    /// The session was not in `Playing`; nothing changed.
    Ignored(GameSession),
}

impl TouchOutcome {
    #[must_use]
    pub fn session(&self) -> &GameSession {
        match self {
            Self::Success(session) | Self::ZoneTouched(session) | Self::Ignored(session) => session,
        }
    }

    #[must_use]
    pub fn into_session(self) -> GameSession {
        match self {
            Self::Success(session) | Self::ZoneTouched(session) | Self::Ignored(session) => session,
        }
    }
}

/// Verdict of a reveal request.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum SolutionCheck {
    /// Coverage met and the zone was never touched.
    Solved {
        score: u32,
        solution_preservation: f32,
    },
    /// Coverage below the level's requirement; the session is unchanged.
    InsufficientCoverage { current: f32, required: f32 },
    /// At least one recorded touch lies inside the zone.
    Failed,
}

/// Ingests one touch: appends it to the log, repaints the grid, and tests it
/// against the level's zone.
///
/// Touches arriving while the session is not `Playing` are silently dropped
/// via [`TouchOutcome::Ignored`]; they are a well-defined no-op, not an
/// error. This is the only path that grows the touch log or the heatmap.
#[must_use]
pub fn process_touch(session: &GameSession, level: &Level, point: TouchPoint) -> TouchOutcome {
    if !session.status().is_playing() {
        return TouchOutcome::Ignored(session.clone());
    }

    let updated = session.with_touch(point);
    if level.solution_zone().contains_touch(point) {
        TouchOutcome::ZoneTouched(updated.with_status(GameStatus::Failed))
    } else {
        TouchOutcome::Success(updated)
    }
}

/// Whether the player has painted enough of the canvas to request a reveal.
///
/// Pure predicate for the host's UI gating; [`check_solution`] re-validates
/// coverage on its own.
#[must_use]
pub fn can_reveal(session: &GameSession, level: &Level) -> bool {
    session.coverage_ratio() >= level.min_coverage_required()
}

/// Judges a full session against a level.
///
/// Coverage is re-checked first, then the touch log is tested against the
/// zone, and finally the preserved fraction of the zone's cells is computed
/// (1.0 when the zone covers no cells).
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn check_solution(session: &GameSession, level: &Level) -> SolutionCheck {
    let coverage = session.coverage_ratio();
    if coverage < level.min_coverage_required() {
        return SolutionCheck::InsufficientCoverage {
            current: coverage,
            required: level.min_coverage_required(),
        };
    }

    let zone = level.solution_zone();
    if session
        .touches()
        .iter()
        .any(|point| zone.contains_touch(*point))
    {
        return SolutionCheck::Failed;
    }

    let heatmap = session.heatmap();
    let zone_cells = zone.covered_cells(heatmap.grid_width(), heatmap.grid_height());
    let solution_preservation = if zone_cells.is_empty() {
        1.0
    } else {
        let untouched = zone_cells
            .iter()
            .filter(|&&(x, y)| heatmap.intensity_at(x, y) < Heatmap::UNTOUCHED_THRESHOLD)
            .count();
        untouched as f32 / zone_cells.len() as f32
    };

    SolutionCheck::Solved {
        score: session.complete(level).score(),
        solution_preservation,
    }
}
