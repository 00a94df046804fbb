use std::path::PathBuf;

use anyhow::Context as _;
use log::info;
use negspace_engine::{Heatmap, generate_hint};

use crate::{
    record::SessionRecord,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct HintArg {
    /// Recorded touch log JSON file; omitted means a fresh canvas
    #[arg(long)]
    input: Option<PathBuf>,
    /// Level id to hint for (defaults to the record's level)
    #[arg(long)]
    level: Option<u32>,
    /// How many hints the player has already consumed
    #[arg(long, default_value_t = 0)]
    hint_level: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &HintArg) -> anyhow::Result<()> {
    let record = arg
        .input
        .as_ref()
        .map(|path| util::read_json_file::<SessionRecord, _>("session record", path))
        .transpose()?;
    let level_id = arg
        .level
        .or(record.as_ref().map(|record| record.level_id))
        .context("either --input or --level is required")?;
    let level = util::find_level(level_id)?;

    let heatmap = match &record {
        Some(record) => record.replay(&level).heatmap().clone(),
        None => Heatmap::default(),
    };

    let hint = generate_hint(&heatmap, &level, arg.hint_level);
    info!(
        "Hint {} for level {} ({})",
        arg.hint_level,
        level.id(),
        level.name()
    );
    Output::save_json(&hint, arg.output.clone())
}
