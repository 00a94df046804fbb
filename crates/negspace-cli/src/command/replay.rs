use std::path::PathBuf;

use log::info;
use negspace_engine::{SolutionCheck, check_solution};

use crate::{
    record::{SessionRecord, SessionSummary, Verdict},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Recorded touch log JSON file
    #[arg(long)]
    input: PathBuf,
    /// Print the replayed heatmap as text art to stderr
    #[arg(long)]
    show_heatmap: bool,
    /// Output file path for the run summary
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let record: SessionRecord = util::read_json_file("session record", &arg.input)?;
    let level = util::find_level(record.level_id)?;
    info!(
        "Replaying {} touches against level {} ({})",
        record.touches.len(),
        level.id(),
        level.name()
    );

    let mut session = record.replay(&level);
    if arg.show_heatmap {
        eprint!("{}", util::render_heatmap(session.heatmap()));
    }

    let check = check_solution(&session, &level);
    session = match check {
        SolutionCheck::InsufficientCoverage { .. } => session,
        SolutionCheck::Solved { .. } | SolutionCheck::Failed => {
            session.reveal_solution().complete(&level)
        }
    };

    let summary = SessionSummary::new(&session, &level, Verdict::from(check));
    Output::save_json(&summary, arg.output.clone())
}
