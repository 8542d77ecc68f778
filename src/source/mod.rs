//! Produces `FileData` for a file pair: both texts and the ranges between them.

pub mod compute;
pub mod types;

pub use compute::load_file_data;
pub use types::{DiffAlgorithm, DiffOptions, FileData, FileSource, SourceError};
