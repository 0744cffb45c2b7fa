use std::path::PathBuf;

use shift48_store::ProfileStore;

use crate::command::play::DEFAULT_DATA_DIR;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    /// Directory holding profile data
    #[clap(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// Number of recent scores to list
    #[clap(long, default_value_t = 10)]
    limit: usize,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let StatsArg { data_dir, limit } = arg;

    let store = ProfileStore::new(data_dir.clone());
    let stats = store.load_statistics()?;

    println!("Lifetime statistics");
    println!("  Games played: {}", stats.games_played);
    println!("  Total score:  {}", stats.total_score);
    println!("  Highest tile: {}", stats.highest_tile);
    println!("  Moves made:   {}", stats.moves_made);
    println!("  Time played:  {}s", stats.time_played_secs);

    let scores = store.recent_scores(*limit)?;
    if scores.is_empty() {
        println!("\nNo games recorded yet.");
        return Ok(());
    }

    println!("\nRecent scores");
    for record in &scores {
        println!(
            "  {}  {:>8}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.score,
            record.difficulty
        );
    }

    Ok(())
}
