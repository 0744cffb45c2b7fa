use clap::{Parser, Subcommand};

use self::{achievements::AchievementsArg, play::PlayArg, stats::StatsArg};

mod achievements;
mod play;
mod stats;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play an interactive game in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Show lifetime statistics and recent scores
    Stats(#[clap(flatten)] StatsArg),
    /// Show the achievement catalog with unlock dates
    Achievements(#[clap(flatten)] AchievementsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::Achievements(arg) => achievements::run(&arg)?,
    }
    Ok(())
}
