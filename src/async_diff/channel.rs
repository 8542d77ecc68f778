use crate::source::{DiffOptions, FileData, FileSource};

#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub generation: u64,
    /// Index of the pair in the CLI list.
    pub pair: usize,
    pub source: FileSource,
    pub options: DiffOptions,
}

#[derive(Debug)]
pub struct DiffResult {
    pub generation: u64,
    pub pair: usize,
    pub data: Result<FileData, String>,
}
