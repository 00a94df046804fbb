use std::path::PathBuf;

use negspace_engine::Level;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LevelsArg {
    /// Show only the level with this id
    #[arg(long)]
    level: Option<u32>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &LevelsArg) -> anyhow::Result<()> {
    match arg.level {
        Some(level_id) => {
            let level = util::find_level(level_id)?;
            Output::save_json(&level, arg.output.clone())
        }
        None => Output::save_json(&Level::catalog(), arg.output.clone()),
    }
}
