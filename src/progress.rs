use indicatif::{ProgressBar, ProgressStyle};

/// Byte counter for a transfer; a bounded bar when the size is known.
pub fn bytes_bar(len: Option<u64>) -> ProgressBar {
    match len {
        Some(n) => {
            let pb = ProgressBar::new(n);
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
            ) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec})") {
                pb.set_style(style);
            }
            pb
        }
    }
}

/// Open-ended counter (lines, records).
pub fn counter(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}: {human_pos}") {
        pb.set_style(style);
    }
    pb.set_message(msg);
    pb
}

pub fn steps(len: u64, msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(msg);
    pb
}
