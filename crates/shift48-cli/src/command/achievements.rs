use std::path::PathBuf;

use shift48_engine::AchievementId;
use shift48_store::ProfileStore;

use crate::command::play::DEFAULT_DATA_DIR;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AchievementsArg {
    /// Directory holding profile data
    #[clap(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

pub(crate) fn run(arg: &AchievementsArg) -> anyhow::Result<()> {
    let AchievementsArg { data_dir } = arg;

    let store = ProfileStore::new(data_dir.clone());
    let unlocks = store.unlocked_achievements()?;

    for id in AchievementId::ALL {
        let unlocked_at = unlocks.iter().find(|u| u.id == id).map(|u| u.timestamp);
        let marker = if unlocked_at.is_some() { "x" } else { " " };
        let when = unlocked_at
            .map(|ts| format!("  (unlocked {})", ts.format("%Y-%m-%d")))
            .unwrap_or_default();
        println!("[{marker}] {:<16} {}{when}", id.title(), id.description());
    }

    Ok(())
}
