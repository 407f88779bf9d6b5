use std::path::{Path, PathBuf};

/// Errors surfaced by the dataset pipeline. Binaries wrap these in `anyhow`.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error during {operation} on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("HTTP transfer from {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },
}

pub type Result<T> = std::result::Result<T, DatasetError>;

impl DatasetError {
    pub fn io(path: impl AsRef<Path>, operation: &'static str, source: std::io::Error) -> Self {
        DatasetError::Io { path: path.as_ref().to_path_buf(), operation, source }
    }

    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        DatasetError::Csv { path: path.as_ref().to_path_buf(), source }
    }
}

/// Attach a path and operation to a bare `io::Result`.
pub trait IoContext<T> {
    fn io_ctx(self, path: impl AsRef<Path>, operation: &'static str) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_ctx(self, path: impl AsRef<Path>, operation: &'static str) -> Result<T> {
        self.map_err(|e| DatasetError::io(path, operation, e))
    }
}

pub trait CsvContext<T> {
    fn csv_ctx(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> CsvContext<T> for std::result::Result<T, csv::Error> {
    fn csv_ctx(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| DatasetError::csv(path, e))
    }
}
