//! Resume bookkeeping shared by every pipeline stage.
//!
//! A stage writes into a staging sibling (`<name>.part`) and renames it onto
//! the final path only after its output is complete. The final path existing
//! therefore means the stage finished; a leftover staging path means a run was
//! interrupted and the stage has to be redone.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{IoContext, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageState {
    NotStarted,
    Partial,
    Complete,
}

impl StageState {
    pub fn of(final_path: &Path) -> StageState {
        if final_path.exists() {
            StageState::Complete
        } else if staging_path(final_path).exists() {
            StageState::Partial
        } else {
            StageState::NotStarted
        }
    }
}

pub fn staging_path(final_path: &Path) -> PathBuf {
    let mut name: OsString = final_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    final_path.with_file_name(name)
}

/// Clear any leftover staging artifact and return a fresh staging path.
/// Parent directories of the final path are created.
pub fn begin(final_path: &Path) -> Result<PathBuf> {
    if let Some(parent) = final_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).io_ctx(parent, "create directory")?;
        }
    }
    let staging = staging_path(final_path);
    if staging.is_dir() {
        warn!("removing partial output {}", staging.display());
        fs::remove_dir_all(&staging).io_ctx(&staging, "remove partial directory")?;
    } else if staging.exists() {
        warn!("removing partial output {}", staging.display());
        fs::remove_file(&staging).io_ctx(&staging, "remove partial file")?;
    }
    Ok(staging)
}

pub fn commit(staging: &Path, final_path: &Path) -> Result<()> {
    fs::rename(staging, final_path).io_ctx(final_path, "rename staged output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_path_appends_part_suffix() {
        assert_eq!(staging_path(Path::new("a/b.csv")), PathBuf::from("a/b.csv.part"));
        assert_eq!(staging_path(Path::new("a/sorted")), PathBuf::from("a/sorted.part"));
    }

    #[test]
    fn state_tracks_staging_and_final_paths() {
        let dir = tempfile::tempdir().unwrap();
        let fin = dir.path().join("out.csv");
        assert_eq!(StageState::of(&fin), StageState::NotStarted);
        let st = begin(&fin).unwrap();
        fs::write(&st, b"half").unwrap();
        assert_eq!(StageState::of(&fin), StageState::Partial);
        let st = begin(&fin).unwrap();
        assert!(!st.exists(), "leftover staging file should be cleared");
        fs::write(&st, b"whole").unwrap();
        commit(&st, &fin).unwrap();
        assert_eq!(StageState::of(&fin), StageState::Complete);
        assert_eq!(fs::read(&fin).unwrap(), b"whole");
    }
}
