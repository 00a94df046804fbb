use chrono::{DateTime, Utc};
use negspace_engine::{GameSession, GameStatus, Level, SolutionCheck, TouchPoint, process_touch};
use serde::{Deserialize, Serialize};

/// On-disk record of one play-through: the level played and the ordered
/// touch log.
///
/// The log is sufficient to reconstruct the whole session because the
/// engine is deterministic over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub recorded_at: DateTime<Utc>,
    pub level_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub touches: Vec<TouchPoint>,
}

impl SessionRecord {
    pub fn new(session: &GameSession, seed: Option<u64>) -> Self {
        Self {
            recorded_at: Utc::now(),
            level_id: session.level_id(),
            seed,
            touches: session.touches().to_vec(),
        }
    }

    /// Rebuilds the session by feeding the touch log back through the
    /// engine. Touches recorded after a zone violation are dropped on
    /// replay, exactly as they were live.
    #[must_use]
    pub fn replay(&self, level: &Level) -> GameSession {
        let mut session = GameSession::for_level(self.level_id, 0);
        for point in &self.touches {
            session = process_touch(&session, level, *point).into_session();
        }
        session
    }
}

/// Serializable mirror of the engine's reveal verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Solved {
        score: u32,
        solution_preservation: f32,
    },
    InsufficientCoverage {
        current: f32,
        required: f32,
    },
    Failed,
}

impl From<SolutionCheck> for Verdict {
    fn from(check: SolutionCheck) -> Self {
        match check {
            SolutionCheck::Solved {
                score,
                solution_preservation,
            } => Self::Solved {
                score,
                solution_preservation,
            },
            SolutionCheck::InsufficientCoverage { current, required } => {
                Self::InsufficientCoverage { current, required }
            }
            SolutionCheck::Failed => Self::Failed,
        }
    }
}

/// Flat summary of a finished run, for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub level_id: u32,
    pub level_name: String,
    pub status: GameStatus,
    pub touch_count: usize,
    pub coverage: f32,
    pub solution_revealed: bool,
    pub score: u32,
    pub verdict: Verdict,
}

impl SessionSummary {
    pub fn new(session: &GameSession, level: &Level, verdict: Verdict) -> Self {
        Self {
            level_id: level.id(),
            level_name: level.name().to_owned(),
            status: session.status(),
            touch_count: session.touch_count(),
            coverage: session.coverage_ratio(),
            solution_revealed: session.solution_revealed(),
            score: session.score(),
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use negspace_engine::check_solution;

    fn touch(x: f32, y: f32, timestamp_ms: u64) -> TouchPoint {
        TouchPoint::new(x, y, timestamp_ms, 1.0).unwrap()
    }

    #[test]
    fn test_replay_reconstructs_session() {
        let level = Level::tutorial();
        let mut session = GameSession::for_level(level.id(), 0);
        for i in 0..10 {
            let point = touch(0.05 + 0.02 * i as f32, 0.1, i * 16);
            session = process_touch(&session, &level, point).into_session();
        }

        let record = SessionRecord::new(&session, Some(7));
        let replayed = record.replay(&level);
        assert_eq!(replayed.touches(), session.touches());
        assert_eq!(replayed.heatmap(), session.heatmap());
        assert_eq!(replayed.status(), session.status());
    }

    #[test]
    fn test_replay_stops_ingesting_after_zone_violation() {
        let level = Level::tutorial();
        let record = SessionRecord {
            recorded_at: Utc::now(),
            level_id: level.id(),
            seed: None,
            touches: vec![touch(0.1, 0.1, 0), touch(0.5, 0.5, 16), touch(0.9, 0.9, 32)],
        };
        let replayed = record.replay(&level);
        assert_eq!(replayed.status(), GameStatus::Failed);
        // The touch after the violation was ignored.
        assert_eq!(replayed.touch_count(), 2);
    }

    #[test]
    fn test_verdict_mirrors_solution_check() {
        let level = Level::tutorial();
        let session = GameSession::for_level(level.id(), 0);
        let verdict = Verdict::from(check_solution(&session, &level));
        assert!(matches!(verdict, Verdict::InsufficientCoverage { .. }));
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let level = Level::tutorial();
        let session =
            process_touch(&GameSession::for_level(0, 0), &level, touch(0.1, 0.1, 0)).into_session();
        let record = SessionRecord::new(&session, Some(42));
        let json = serde_json::to_string(&record).unwrap();
        let parsed: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.level_id, record.level_id);
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.touches, record.touches);
    }
}
