use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use log::{debug, info};
use negspace_engine::{
    GameSession, SolutionCheck, SolutionZone, TouchPoint, can_reveal, check_solution,
    process_touch,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    record::{SessionRecord, SessionSummary, Verdict},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Level id to play
    #[arg(long, default_value_t = 0)]
    level: u32,
    /// Number of random touches to attempt
    #[arg(long, default_value_t = 64)]
    touches: u64,
    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Resample touches that would land inside the solution zone
    #[arg(long)]
    avoid_zone: bool,
    /// Where to write the recorded touch log
    #[arg(long)]
    record: Option<PathBuf>,
    /// Output file path for the run summary
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let level = util::find_level(arg.level)?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);
    info!(
        "Simulating level {} ({}) with seed {seed}",
        level.id(),
        level.name()
    );

    let avoid = arg.avoid_zone.then_some(level.solution_zone());
    let started_at_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let mut session = GameSession::for_level(level.id(), started_at_ms);
    for n in 0..arg.touches {
        let point = random_touch(&mut rng, n, avoid)?;
        let outcome = process_touch(&session, &level, point);
        let hit_zone = outcome.is_zone_touched();
        if hit_zone {
            info!(
                "Touch {n} hit the solution zone at ({:.2}, {:.2})",
                point.x(),
                point.y()
            );
        }
        session = outcome.into_session();
        if hit_zone {
            break;
        }
    }
    debug!(
        "Coverage after {} touches: {:.3}",
        session.touch_count(),
        session.coverage_ratio()
    );

    // The reveal gate mirrors the check inside check_solution, so the
    // verdict is InsufficientCoverage exactly when the gate stays closed.
    let verdict = if can_reveal(&session, &level) {
        let check = check_solution(&session, &level);
        session = match check {
            SolutionCheck::InsufficientCoverage { .. } => session,
            SolutionCheck::Solved { .. } | SolutionCheck::Failed => {
                session.reveal_solution().complete(&level)
            }
        };
        Verdict::from(check)
    } else {
        info!(
            "Coverage {:.3} is below the required {:.3}; reveal not attempted",
            session.coverage_ratio(),
            level.min_coverage_required()
        );
        Verdict::InsufficientCoverage {
            current: session.coverage_ratio(),
            required: level.min_coverage_required(),
        }
    };

    if let Some(path) = &arg.record {
        Output::save_json(&SessionRecord::new(&session, Some(seed)), Some(path.clone()))?;
        info!("Recorded touch log written to {}", path.display());
    }

    let summary = SessionSummary::new(&session, &level, verdict);
    Output::save_json(&summary, arg.output.clone())
}

fn random_touch(
    rng: &mut Pcg32,
    sequence: u64,
    avoid: Option<&SolutionZone>,
) -> anyhow::Result<TouchPoint> {
    // Rejection sampling is bounded; after that the candidate is kept even
    // if it lies inside the zone.
    const MAX_ATTEMPTS: usize = 32;

    let mut point = sample_touch(rng, sequence)?;
    if let Some(zone) = avoid {
        for _ in 1..MAX_ATTEMPTS {
            if !zone.contains_touch(point) {
                break;
            }
            point = sample_touch(rng, sequence)?;
        }
    }
    Ok(point)
}

fn sample_touch(rng: &mut Pcg32, sequence: u64) -> anyhow::Result<TouchPoint> {
    let x: f32 = rng.random_range(0.0..=1.0);
    let y: f32 = rng.random_range(0.0..=1.0);
    let pressure: f32 = rng.random_range(0.5..=1.0);
    // Roughly one touch per 60Hz frame.
    let timestamp_ms = sequence * 16;
    TouchPoint::new(x, y, timestamp_ms, pressure).context("generated touch outside the canvas")
}
