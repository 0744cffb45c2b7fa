use std::path::PathBuf;

use log::warn;
use shift48_engine::{Difficulty, GameSession, SpawnSeed};
use shift48_store::ProfileStore;

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;

pub(crate) const DEFAULT_DATA_DIR: &str = "./data/profile";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Start a game at this difficulty immediately instead of the main menu
    #[clap(long)]
    difficulty: Option<Difficulty>,
    /// Path to a JSON configuration file
    #[clap(long)]
    config: Option<PathBuf>,
    /// Directory holding profile data [default: ./data/profile]
    #[clap(long)]
    data_dir: Option<PathBuf>,
    /// Spawn seed as 32 hex characters, for reproducible games
    #[clap(long)]
    seed: Option<SpawnSeed>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        difficulty,
        config,
        data_dir,
        seed,
    } = arg;

    let config = util::load_config(config.as_deref());
    let mut session = match seed {
        Some(seed) => GameSession::with_seed(config, *seed)?,
        None => GameSession::new(config)?,
    };

    let data_dir = data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let store = ProfileStore::new(data_dir);
    match store.unlocked_achievements() {
        Ok(unlocks) => {
            let ids = unlocks.iter().map(|u| u.id).collect::<Vec<_>>();
            session.preload_achievements(&ids);
        }
        Err(err) => warn!("could not load achievement history: {err:#}"),
    }

    let mut app = PlayApp::new(session, store, *difficulty);
    Tui::new().run(&mut app)
}
