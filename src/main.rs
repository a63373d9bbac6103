use std::env;
use std::path::PathBuf;

use anyhow::Context;
use chatstat::{ChatStatistics, StatsConfig};
use tracing_subscriber::EnvFilter;

/// Chat export read from the data directory.
const CHAT_EXPORT_FILE_NAME: &str = "cs_stackoverflow.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let data_dir = env::var_os("CHATSTAT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let config = StatsConfig::discover(&data_dir)
        .with_context(|| format!("loading configuration from {}", data_dir.display()))?;
    let stats = ChatStatistics::new(data_dir.join(CHAT_EXPORT_FILE_NAME), &config)?;
    stats.generate_word_cloud_default(&data_dir)?;

    println!("Done");
    Ok(())
}
