// Lichess puzzle database -> rating-windowed train/test datasets
pub mod error;
pub mod params;
pub mod stage;
pub mod progress;
pub mod fetch;
pub mod decompress;
pub mod puzzle;
pub mod bucketer;
pub mod split;
pub mod windows;
pub mod windower;
pub mod pipeline;

pub use error::{DatasetError, Result};
pub use params::DatasetParams;
