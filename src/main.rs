use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use piebot_puzzles::params::{DatasetParams, DEFAULT_SEED, PUZZLE_DB_URL};
use piebot_puzzles::pipeline;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build rating-windowed train/test puzzle datasets", long_about = None)]
struct Args {
    /// Directory holding the archive, extracted CSV, sorted/ and datasets/
    #[arg(long, default_value = "data")]
    data_root: PathBuf,

    /// Source of the compressed puzzle database
    #[arg(long, default_value = PUZZLE_DB_URL)]
    url: String,

    /// Seed for the train/test shuffles
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Debug-level logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let params = DatasetParams { data_root: args.data_root, url: args.url, seed: args.seed, ..DatasetParams::default() };
    let report = pipeline::run(&params)
        .with_context(|| format!("building puzzle dataset under {}", params.data_root.display()))?;
    if let Some(w) = &report.windowed {
        info!("{} windows, {} train rows, {} test rows", w.windows, w.train_rows, w.test_rows);
    }
    Ok(())
}
