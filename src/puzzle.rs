//! Field access for Lichess puzzle rows.
//!
//! Records stay as `csv::StringRecord`s so that every source column survives
//! untouched; `Columns` resolves the handful of named fields the pipeline
//! reads by looking them up once in the header.

use csv::StringRecord;

pub const RATING: &str = "Rating";
pub const THEMES: &str = "Themes";

/// Rating floored to a multiple of the bucket width.
pub type RatingBucket = u64;

#[derive(Clone, Copy, Debug, Default)]
pub struct Columns {
    pub rating: Option<usize>,
    pub themes: Option<usize>,
}

impl Columns {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self { rating: find(RATING), themes: find(THEMES) }
    }

    pub fn rating<'r>(&self, rec: &'r StringRecord) -> Option<&'r str> { self.rating.and_then(|i| rec.get(i)) }
    pub fn themes<'r>(&self, rec: &'r StringRecord) -> Option<&'r str> { self.themes.and_then(|i| rec.get(i)) }
}

/// Parse a rating that must be a plain run of ASCII digits (surrounding
/// whitespace allowed). Signs and decimals are rejected, as is anything
/// past `u64::MAX`.
pub fn parse_rating(raw: &str) -> Option<u64> {
    let s = raw.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) { return None; }
    s.parse::<u64>().ok()
}

pub fn rating_bucket(rating: u64, width: u32) -> RatingBucket {
    let w = u64::from(width.max(1));
    (rating / w) * w
}

/// Whitespace-separated theme tokens, first occurrence wins.
pub fn theme_tokens(raw: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for tok in raw.split_whitespace() {
        if !out.contains(&tok) { out.push(tok); }
    }
    out
}

/// Whether `tok` can be used as a file stem directly under a bucket directory.
pub fn is_file_stem(tok: &str) -> bool {
    !tok.is_empty() && tok != "." && tok != ".." && !tok.contains(['/', '\\'])
}
