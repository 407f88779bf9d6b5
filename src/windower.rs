use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info};
use rand::Rng;

use crate::bucketer::write_records;
use crate::error::{CsvContext, IoContext, Result};
use crate::params::DatasetParams;
use crate::progress;
use crate::puzzle::RatingBucket;
use crate::split::{shuffle_split, Split};
use crate::stage::{self, StageState};
use crate::windows::build_windows;

pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub buckets: usize,
    pub windows: usize,
    pub train_rows: u64,
    pub test_rows: u64,
}

/// Numeric subdirectories of `root`, ascending by value. Only canonical
/// names count (`100`, not `0100` or `+100`), so each bucket maps back to
/// exactly one directory.
pub fn list_buckets(root: &Path) -> Result<Vec<RatingBucket>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(root).io_ctx(root, "list directory")? {
        let entry = entry.io_ctx(root, "list directory")?;
        if !entry.file_type().io_ctx(entry.path(), "stat")?.is_dir() { continue; }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        match name.parse::<RatingBucket>() {
            Ok(b) if b.to_string() == name => out.push(b),
            Ok(_) => debug!("ignoring non-canonical bucket directory {}", name),
            Err(_) => {}
        }
    }
    out.sort_unstable();
    Ok(out)
}

/// `*.csv` files directly in `dir`, sorted by file name so shuffles replay
/// in the same order on every platform.
pub fn list_theme_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).io_ctx(dir, "list directory")? {
        let path = entry.io_ctx(dir, "list directory")?.path();
        if path.is_file() && path.extension().map_or(false, |e| e == "csv") {
            out.push(path);
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

pub fn read_partition(path: &Path) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut rdr = csv::Reader::from_path(path).csv_ctx(path)?;
    let headers = rdr.headers().csv_ctx(path)?.clone();
    let recs = rdr.into_records().collect::<std::result::Result<Vec<_>, _>>().csv_ctx(path)?;
    Ok((headers, recs))
}

/// Split every theme file of one bucket and pool the results.
/// Also returns the header of the first partition read, if any.
pub fn split_bucket<R: Rng + ?Sized>(
    dir: &Path,
    rng: &mut R,
    params: &DatasetParams,
) -> Result<(Option<StringRecord>, Split<StringRecord>)> {
    let mut header = None;
    let mut pooled = Split::default();
    for path in list_theme_files(dir)? {
        let (h, recs) = read_partition(&path)?;
        let n = recs.len();
        let s = shuffle_split(recs, rng, params.max_test, params.max_train);
        debug!("{}: {} records -> test {} train {}", path.display(), n, s.test.len(), s.train.len());
        header.get_or_insert(h);
        pooled.extend(s);
    }
    Ok((header, pooled))
}

/// Build `<out_root>/<window>/{train,test}.csv` from the bucketed tree.
/// Returns `None` when the output already exists.
pub fn build_datasets<R: Rng + ?Sized>(
    sorted_root: &Path,
    out_root: &Path,
    params: &DatasetParams,
    rng: &mut R,
) -> Result<Option<WindowStats>> {
    if StageState::of(out_root) == StageState::Complete {
        info!("{} already exists, skipping dataset creation", out_root.display());
        return Ok(None);
    }
    let staging = stage::begin(out_root)?;
    fs::create_dir_all(&staging).io_ctx(&staging, "create directory")?;

    let buckets = list_buckets(sorted_root)?;
    info!("splitting {} rating buckets from {}", buckets.len(), sorted_root.display());

    let pb = progress::steps(buckets.len() as u64, "buckets");
    let mut header: Option<StringRecord> = None;
    let mut per_bucket: Vec<Split<StringRecord>> = Vec::with_capacity(buckets.len());
    for b in &buckets {
        let (h, s) = split_bucket(&sorted_root.join(b.to_string()), rng, params)?;
        if header.is_none() { header = h; }
        per_bucket.push(s);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut stats = WindowStats { buckets: buckets.len(), ..WindowStats::default() };
    if let Some(header) = header {
        for w in build_windows(&buckets) {
            let mut agg: Split<StringRecord> = Split::default();
            for b in &w.buckets {
                if let Ok(idx) = buckets.binary_search(b) { agg.extend_from(&per_bucket[idx]); }
            }
            let dir = staging.join(w.name());
            fs::create_dir_all(&dir).io_ctx(&dir, "create directory")?;
            if !agg.train.is_empty() { write_records(&dir.join(TRAIN_FILE), &header, &agg.train)?; }
            if !agg.test.is_empty() { write_records(&dir.join(TEST_FILE), &header, &agg.test)?; }
            info!("{}: train {} test {}", w.name(), agg.train.len(), agg.test.len());
            stats.windows += 1;
            stats.train_rows += agg.train.len() as u64;
            stats.test_rows += agg.test.len() as u64;
        }
    }

    stage::commit(&staging, out_root)?;
    info!("wrote {} windows to {}", stats.windows, out_root.display());
    Ok(Some(stats))
}
