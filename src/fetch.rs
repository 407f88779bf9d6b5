use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use log::info;

use crate::error::{DatasetError, IoContext, Result};
use crate::progress;
use crate::stage::{self, StageState};

/// Make sure the archive exists at `target`, streaming it from `url` if not.
/// Returns `true` when a download happened.
pub fn ensure_archive(url: &str, target: &Path) -> Result<bool> {
    if StageState::of(target) == StageState::Complete {
        info!("{} already exists, skipping download", target.display());
        return Ok(false);
    }
    let staging = stage::begin(target)?;
    info!("downloading {} -> {}", url, target.display());

    let http_err = |source: reqwest::Error| DatasetError::Http { url: url.to_string(), source };
    // The blocking client defaults to a 30s total timeout, far too short for the full dump.
    let client = reqwest::blocking::Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(http_err)?;
    let response = client.get(url).send().map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DatasetError::HttpStatus { url: url.to_string(), status: status.as_u16() });
    }
    let total = response.content_length();
    match total {
        Some(n) => info!("transfer size {} bytes", n),
        None => info!("transfer size not reported"),
    }

    let pb = progress::bytes_bar(total);
    let mut reader = pb.wrap_read(response);
    let mut out = BufWriter::new(File::create(&staging).io_ctx(&staging, "create")?);
    let written = io::copy(&mut reader, &mut out).io_ctx(&staging, "download")?;
    out.flush().io_ctx(&staging, "flush")?;
    drop(out);
    pb.finish_and_clear();

    stage::commit(&staging, target)?;
    info!("downloaded {} bytes to {}", written, target.display());
    Ok(true)
}
