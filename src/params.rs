use std::path::PathBuf;

pub const PUZZLE_DB_URL: &str = "https://database.lichess.org/lichess_db_puzzle.csv.zst";
pub const ARCHIVE_FILE: &str = "lichess_db_puzzle.csv.zst";
pub const CSV_FILE: &str = "lichess_db_puzzle.csv";
pub const SORTED_DIR: &str = "sorted";
pub const DATASETS_DIR: &str = "datasets";
pub const DEFAULT_SEED: u64 = 42;

/// Knobs for one pipeline run. `Default` is the compiled-in configuration.
#[derive(Clone, Debug)]
pub struct DatasetParams {
    pub data_root: PathBuf,
    pub url: String,
    pub seed: u64,
    pub max_test: usize,    // per-partition test cap
    pub max_train: usize,   // per-partition train cap
    pub bucket_width: u32,  // rating bucket width
}

impl Default for DatasetParams {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            url: PUZZLE_DB_URL.to_string(),
            seed: DEFAULT_SEED,
            max_test: 10,
            max_train: 20,
            bucket_width: 100,
        }
    }
}

impl DatasetParams {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { data_root: root.into(), ..Self::default() }
    }

    pub fn archive_path(&self) -> PathBuf { self.data_root.join(ARCHIVE_FILE) }
    pub fn csv_path(&self) -> PathBuf { self.data_root.join(CSV_FILE) }
    pub fn sorted_root(&self) -> PathBuf { self.data_root.join(SORTED_DIR) }
    pub fn datasets_root(&self) -> PathBuf { self.data_root.join(DATASETS_DIR) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_nests_under_data_root() {
        let p = DatasetParams::with_root("/tmp/x");
        assert_eq!(p.archive_path(), PathBuf::from("/tmp/x/lichess_db_puzzle.csv.zst"));
        assert_eq!(p.csv_path(), PathBuf::from("/tmp/x/lichess_db_puzzle.csv"));
        assert_eq!(p.sorted_root(), PathBuf::from("/tmp/x/sorted"));
        assert_eq!(p.datasets_root(), PathBuf::from("/tmp/x/datasets"));
        assert_eq!(p.seed, 42);
    }
}
