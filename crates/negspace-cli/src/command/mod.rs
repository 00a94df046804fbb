use clap::{Parser, Subcommand};

use self::{hint::HintArg, levels::LevelsArg, replay::ReplayArg, simulate::SimulateArg};

mod hint;
mod levels;
mod replay;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the built-in level catalog
    Levels(#[clap(flatten)] LevelsArg),
    /// Play a level with randomly generated touches
    Simulate(#[clap(flatten)] SimulateArg),
    /// Re-run a recorded session and judge it
    Replay(#[clap(flatten)] ReplayArg),
    /// Generate a hint for a session in progress
    Hint(#[clap(flatten)] HintArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Levels(LevelsArg::default())) {
        Mode::Levels(arg) => levels::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::Hint(arg) => hint::run(&arg)?,
    }
    Ok(())
}
