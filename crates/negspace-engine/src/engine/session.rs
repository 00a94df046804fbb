use serde::{Deserialize, Serialize};

use crate::{Heatmap, Level, TouchPoint};

/// Lifecycle state of a [`GameSession`].
///
/// `Playing` may move to any other state; `Paused` may move back to
/// `Playing`; `Completed` and `Failed` are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GameStatus {
    #[default]
    Playing,
    Completed,
    Failed,
    Paused,
}

impl GameStatus {
    /// Whether the session can never leave this state again.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Immutable aggregate of one play-through: the heatmap, the touch log, and
/// the lifecycle state.
///
/// Every update produces a new session value; earlier snapshots stay valid.
/// The score is zero unless the status is [`GameStatus::Completed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    level_id: u32,
    heatmap: Heatmap,
    touches: Vec<TouchPoint>,
    started_at_ms: u64,
    status: GameStatus,
    solution_revealed: bool,
    score: u32,
}

impl GameSession {
    /// Starts a fresh session for a level on the default grid.
    #[must_use]
    pub fn for_level(level_id: u32, started_at_ms: u64) -> Self {
        Self::for_level_with_heatmap(level_id, started_at_ms, Heatmap::default())
    }

    /// Starts a fresh session on a caller-provided grid, for hosts that use
    /// a non-default resolution.
    #[must_use]
    pub fn for_level_with_heatmap(level_id: u32, started_at_ms: u64, heatmap: Heatmap) -> Self {
        Self {
            level_id,
            heatmap,
            touches: vec![],
            started_at_ms,
            status: GameStatus::Playing,
            solution_revealed: false,
            score: 0,
        }
    }

    #[must_use]
    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    #[must_use]
    pub fn heatmap(&self) -> &Heatmap {
        &self.heatmap
    }

    #[must_use]
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    #[must_use]
    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn solution_revealed(&self) -> bool {
        self.solution_revealed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Coverage of the canvas at the default untouched threshold.
    #[must_use]
    pub fn coverage_ratio(&self) -> f32 {
        self.heatmap.coverage_ratio(Heatmap::UNTOUCHED_THRESHOLD)
    }

    #[must_use]
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    /// Whether the level's time limit (if any) has run out.
    #[must_use]
    pub fn is_expired(&self, level: &Level, now_ms: u64) -> bool {
        level
            .time_limit_ms()
            .is_some_and(|limit| self.elapsed_ms(now_ms) > limit)
    }

    /// Appends a touch to the log and paints it onto the heatmap.
    ///
    /// Touch ingestion goes through [`process_touch`] so status checks and
    /// zone tests stay in one place.
    ///
    /// [`process_touch`]: crate::process_touch
    pub(crate) fn with_touch(&self, point: TouchPoint) -> Self {
        let mut touches = self.touches.clone();
        touches.push(point);
        Self {
            heatmap: self.heatmap.paint(point, Heatmap::DEFAULT_TOUCH_RADIUS),
            touches,
            ..self.clone()
        }
    }

    pub(crate) fn with_status(&self, status: GameStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Marks the solution as shown to the player.
    #[must_use]
    pub fn reveal_solution(&self) -> Self {
        Self {
            solution_revealed: true,
            ..self.clone()
        }
    }

    /// Suspends an active session. Any other state is returned unchanged.
    #[must_use]
    pub fn pause(&self) -> Self {
        if self.status.is_playing() {
            self.with_status(GameStatus::Paused)
        } else {
            self.clone()
        }
    }

    /// Resumes a paused session. Any other state is returned unchanged.
    #[must_use]
    pub fn resume(&self) -> Self {
        if self.status.is_paused() {
            self.with_status(GameStatus::Playing)
        } else {
            self.clone()
        }
    }

    /// Finalizes the session against a level.
    ///
    /// If any recorded touch lies inside the solution zone the session
    /// fails with a zero score, otherwise it completes with the computed
    /// score.
    #[must_use]
    pub fn complete(&self, level: &Level) -> Self {
        let solution_touched = self
            .touches
            .iter()
            .any(|point| level.solution_zone().contains_touch(*point));
        let (status, score) = if solution_touched {
            (GameStatus::Failed, 0)
        } else {
            (GameStatus::Completed, self.calculate_score(level))
        };
        Self {
            status,
            score,
            ..self.clone()
        }
    }

    /// Score formula: a flat base, a coverage bonus, an efficiency bonus
    /// that shrinks with every touch, all scaled by the difficulty
    /// multiplier and truncated to a whole number.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn calculate_score(&self, level: &Level) -> u32 {
        let base = 1000.0;
        let coverage_bonus = (self.coverage_ratio() * 500.0).floor();
        let efficiency_bonus = (300.0 - 2.0 * self.touch_count() as f32).max(0.0);
        ((base + coverage_bonus + efficiency_bonus) * level.difficulty().score_multiplier()) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;

    fn touch(x: f32, y: f32) -> TouchPoint {
        TouchPoint::new(x, y, 0, 1.0).unwrap()
    }

    #[test]
    fn test_fresh_session() {
        let session = GameSession::for_level(3, 1_000);
        assert_eq!(session.level_id(), 3);
        assert_eq!(session.touch_count(), 0);
        assert_eq!(session.coverage_ratio(), 0.0);
        assert_eq!(session.status(), GameStatus::Playing);
        assert!(!session.solution_revealed());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_with_touch_appends_and_paints() {
        let session = GameSession::for_level(0, 0);
        let updated = session.with_touch(touch(0.1, 0.1));
        assert_eq!(updated.touch_count(), 1);
        assert!(updated.coverage_ratio() > 0.0);
        // The original snapshot is untouched.
        assert_eq!(session.touch_count(), 0);
        assert_eq!(session.coverage_ratio(), 0.0);
    }

    #[test]
    fn test_for_level_with_heatmap_uses_custom_grid() {
        let heatmap = Heatmap::empty(5, 5).unwrap();
        let session = GameSession::for_level_with_heatmap(0, 0, heatmap);
        assert_eq!(session.heatmap().grid_width(), 5);
        let updated = session.with_touch(touch(0.5, 0.5));
        // One touch on a 5x5 grid already covers a noticeable fraction.
        assert!(updated.coverage_ratio() > 0.1);
    }

    #[test]
    fn test_reveal_solution_sets_flag() {
        let session = GameSession::for_level(0, 0).reveal_solution();
        assert!(session.solution_revealed());
    }

    #[test]
    fn test_pause_and_resume() {
        let session = GameSession::for_level(0, 0);
        let paused = session.pause();
        assert_eq!(paused.status(), GameStatus::Paused);
        let resumed = paused.resume();
        assert_eq!(resumed.status(), GameStatus::Playing);
    }

    #[test]
    fn test_terminal_states_cannot_pause_or_resume() {
        let completed = GameSession::for_level(0, 0).with_status(GameStatus::Completed);
        assert_eq!(completed.pause().status(), GameStatus::Completed);
        assert_eq!(completed.resume().status(), GameStatus::Completed);
        let failed = GameSession::for_level(0, 0).with_status(GameStatus::Failed);
        assert_eq!(failed.pause().status(), GameStatus::Failed);
    }

    #[test]
    fn test_complete_with_clean_log_scores() {
        let level = Level::tutorial();
        let session = GameSession::for_level(0, 0).with_touch(touch(0.1, 0.1));
        let completed = session.complete(&level);
        assert_eq!(completed.status(), GameStatus::Completed);
        assert!(completed.score() > 0);
    }

    #[test]
    fn test_complete_with_zone_touch_fails() {
        let level = Level::tutorial();
        let session = GameSession::for_level(0, 0).with_touch(touch(0.5, 0.5));
        let completed = session.complete(&level);
        assert_eq!(completed.status(), GameStatus::Failed);
        assert_eq!(completed.score(), 0);
    }

    #[test]
    fn test_score_formula_on_empty_session() {
        // No touches: base 1000 + coverage 0 + full efficiency bonus 300.
        let easy = Level::tutorial();
        assert_eq!(GameSession::for_level(0, 0).complete(&easy).score(), 1300);

        let expert = Level::new(
            1,
            "Expert",
            "",
            *easy.solution_zone(),
        )
        .with_difficulty(Difficulty::Expert);
        assert_eq!(GameSession::for_level(1, 0).complete(&expert).score(), 3900);
    }

    #[test]
    fn test_efficiency_bonus_exhausts_after_150_touches() {
        let zone = crate::SolutionZone::rectangle(0.9, 0.9, 0.1, 0.1).unwrap();
        let level = Level::new(0, "Test", "", zone).with_difficulty(Difficulty::Easy);
        let mut session = GameSession::for_level(0, 0);
        for _ in 0..200 {
            session = session.with_touch(touch(0.1, 0.1));
        }
        let score = session.complete(&level).score();
        let coverage_bonus = (session.coverage_ratio() * 500.0).floor() as u32;
        assert_eq!(score, 1000 + coverage_bonus);
    }

    #[test]
    fn test_elapsed_and_expiry() {
        let session = GameSession::for_level(10, 5_000);
        assert_eq!(session.elapsed_ms(8_000), 3_000);
        assert_eq!(session.elapsed_ms(4_000), 0);

        let timed = Level::tutorial().with_time_limit_ms(60_000);
        assert!(!session.is_expired(&timed, 65_000));
        assert!(session.is_expired(&timed, 65_001));
        assert!(!session.is_expired(&Level::tutorial(), u64::MAX));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let session = GameSession::for_level(2, 123)
            .with_touch(touch(0.2, 0.3))
            .with_touch(touch(0.7, 0.8))
            .reveal_solution();
        let serialized = serde_json::to_string(&session).unwrap();
        let deserialized: GameSession = serde_json::from_str(&serialized).unwrap();
        assert_eq!(session, deserialized);
    }
}
