use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};

use crate::error::{CsvContext, IoContext, Result};
use crate::progress;
use crate::puzzle::{self, Columns, RatingBucket};
use crate::stage::{self, StageState};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    pub bucket: RatingBucket,
    pub theme: String,
}

/// Counters for one bucketing pass. Dropped rows never fail the run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketStats {
    pub rows: u64,
    pub bad_rating: u64,
    pub no_themes: u64,
    pub bad_theme_tokens: u64,
    pub placements: u64,
}

/// (bucket, theme) -> records in first-seen order. Every placement owns its
/// own copy of the row.
pub struct Partitions {
    headers: StringRecord,
    columns: Columns,
    width: u32,
    groups: BTreeMap<PartitionKey, Vec<StringRecord>>,
    pub stats: BucketStats,
}

impl Partitions {
    pub fn new(headers: StringRecord, width: u32) -> Self {
        let columns = Columns::from_headers(&headers);
        Self { headers, columns, width, groups: BTreeMap::new(), stats: BucketStats::default() }
    }

    pub fn insert(&mut self, rec: StringRecord) {
        self.stats.rows += 1;
        let rating = match self.columns.rating(&rec).and_then(puzzle::parse_rating) {
            Some(r) => r,
            None => { self.stats.bad_rating += 1; return; }
        };
        let bucket = puzzle::rating_bucket(rating, self.width);
        let tokens = puzzle::theme_tokens(self.columns.themes(&rec).unwrap_or(""));
        if tokens.is_empty() { self.stats.no_themes += 1; return; }
        for tok in tokens {
            if !puzzle::is_file_stem(tok) { self.stats.bad_theme_tokens += 1; continue; }
            let key = PartitionKey { bucket, theme: tok.to_string() };
            self.groups.entry(key).or_default().push(rec.clone());
            self.stats.placements += 1;
        }
    }

    pub fn get(&self, bucket: RatingBucket, theme: &str) -> Option<&[StringRecord]> {
        self.groups.get(&PartitionKey { bucket, theme: theme.to_string() }).map(|v| v.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &PartitionKey> { self.groups.keys() }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    /// Write `<root>/<bucket>/<theme>.csv` for every partition.
    pub fn write_to(&self, root: &Path) -> Result<usize> {
        fs::create_dir_all(root).io_ctx(root, "create directory")?;
        let mut current: Option<RatingBucket> = None;
        for (key, recs) in &self.groups {
            if recs.is_empty() { continue; }
            let dir = root.join(key.bucket.to_string());
            if current != Some(key.bucket) {
                fs::create_dir_all(&dir).io_ctx(&dir, "create directory")?;
                current = Some(key.bucket);
            }
            let path = dir.join(format!("{}.csv", key.theme));
            write_records(&path, &self.headers, recs)?;
        }
        Ok(self.groups.len())
    }
}

pub fn write_records(path: &Path, headers: &StringRecord, recs: &[StringRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(File::create(path).io_ctx(path, "create")?);
    wtr.write_record(headers).csv_ctx(path)?;
    for r in recs { wtr.write_record(r).csv_ctx(path)?; }
    wtr.flush().io_ctx(path, "flush")
}

/// Group every row of a headed CSV stream. A malformed row aborts.
pub fn group_records<R: Read>(input: R, source: &Path, width: u32) -> Result<Partitions> {
    let mut rdr = csv::Reader::from_reader(input);
    let headers = rdr.headers().csv_ctx(source)?.clone();
    let mut parts = Partitions::new(headers, width);
    let pb = progress::counter("puzzles");
    for rec in rdr.into_records() {
        parts.insert(rec.csv_ctx(source)?);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(parts)
}

/// Bucket `csv_path` into `out_root`. Returns `None` when the output already
/// exists and nothing was done.
pub fn bucket_puzzles(csv_path: &Path, out_root: &Path, width: u32) -> Result<Option<BucketStats>> {
    if StageState::of(out_root) == StageState::Complete {
        info!("{} already exists, skipping bucketing", out_root.display());
        return Ok(None);
    }
    let staging = stage::begin(out_root)?;
    info!("bucketing {} by rating and theme", csv_path.display());

    let file = File::open(csv_path).io_ctx(csv_path, "open")?;
    let parts = group_records(std::io::BufReader::new(file), csv_path, width)?;
    let written = parts.write_to(&staging)?;
    stage::commit(&staging, out_root)?;

    let s = &parts.stats;
    info!("wrote {} partitions to {} ({} rows, {} placements)", written, out_root.display(), s.rows, s.placements);
    if s.bad_rating > 0 || s.no_themes > 0 || s.bad_theme_tokens > 0 {
        info!("dropped: {} invalid rating, {} without themes, {} unusable theme tokens", s.bad_rating, s.no_themes, s.bad_theme_tokens);
    }
    debug!("buckets: {:?}", parts.keys().map(|k| k.bucket).collect::<std::collections::BTreeSet<_>>());
    Ok(Some(parts.stats.clone()))
}
