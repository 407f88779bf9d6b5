use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};

use crate::error::{CsvContext, IoContext, Result};
use crate::progress;
use crate::stage::{self, StageState};

/// Stream the zstd archive into a normalized CSV at `target`.
/// Returns `true` when the CSV was (re)built.
///
/// Lines are re-read with a CSV parser rather than split on raw commas, so a
/// quoted field that contains a comma survives intact. Row lengths are kept as
/// found (the writer is flexible), and blank lines are dropped.
pub fn decompress_archive(archive: &Path, target: &Path) -> Result<bool> {
    if StageState::of(target) == StageState::Complete {
        info!("{} already exists, skipping extraction", target.display());
        return Ok(false);
    }
    let staging = stage::begin(target)?;
    info!("extracting {} -> {}", archive.display(), target.display());

    let file = File::open(archive).io_ctx(archive, "open archive")?;
    let decoder = zstd::Decoder::new(file).io_ctx(archive, "create zstd decoder")?;
    let rows = normalize(decoder, archive, &staging)?;

    stage::commit(&staging, target)?;
    info!("wrote {} rows to {}", rows, target.display());
    Ok(true)
}

/// Re-serialize every line of `input` into a CSV file at `out`.
///
/// Each physical line is parsed on its own, so a stray quote damages at most
/// the line it sits on. A line the CSV parser rejects is split on raw commas.
pub fn normalize<R: Read>(input: R, source: &Path, out: &Path) -> Result<u64> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(out)
        .csv_ctx(out)?;
    let pb = progress::counter("rows");
    let mut rows = 0u64;
    for line in BufReader::new(input).lines() {
        let line = line.io_ctx(source, "read line")?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() { continue; }
        let rec = parse_line(line).unwrap_or_else(|| {
            debug!("unparseable line in {}, splitting on commas", source.display());
            StringRecord::from(line.split(',').collect::<Vec<_>>())
        });
        wtr.write_record(&rec).csv_ctx(out)?;
        rows += 1;
        pb.inc(1);
    }
    wtr.flush().io_ctx(out, "flush")?;
    pb.finish_and_clear();
    Ok(rows)
}

fn parse_line(line: &str) -> Option<StringRecord> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    rdr.records().next()?.ok()
}
