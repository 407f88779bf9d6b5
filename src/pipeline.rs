use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::bucketer::{self, BucketStats};
use crate::decompress;
use crate::error::Result;
use crate::fetch;
use crate::params::DatasetParams;
use crate::windower::{self, WindowStats};

/// What each stage did on this run. `None` stats mean the stage was skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub downloaded: bool,
    pub extracted: bool,
    pub bucketed: Option<BucketStats>,
    pub windowed: Option<WindowStats>,
}

/// Fetch, extract, bucket, and window. Each stage is skipped when its output
/// is already in place.
pub fn run(params: &DatasetParams) -> Result<RunReport> {
    // One generator for the whole run; shuffle order is bucket order then file order.
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let downloaded = fetch::ensure_archive(&params.url, &params.archive_path())?;
    let mut report = run_local(params, &mut rng)?;
    report.downloaded = downloaded;
    Ok(report)
}

/// Everything after the download, for when the archive is already on disk.
pub fn run_local(params: &DatasetParams, rng: &mut SmallRng) -> Result<RunReport> {
    let extracted = decompress::decompress_archive(&params.archive_path(), &params.csv_path())?;
    let bucketed = bucketer::bucket_puzzles(&params.csv_path(), &params.sorted_root(), params.bucket_width)?;
    let windowed = windower::build_datasets(&params.sorted_root(), &params.datasets_root(), params, rng)?;
    info!("dataset ready under {}", params.data_root.display());
    Ok(RunReport { downloaded: false, extracted, bucketed, windowed })
}
