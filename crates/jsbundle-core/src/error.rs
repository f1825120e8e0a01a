use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while producing a bundle.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to read directory {}: {}", .path.display(), .source)]
    DirRead { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {}", .path.display(), .source)]
    FileRead { path: PathBuf, source: io::Error },
}

/// Failures while writing segments back out to disk.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("{} already exists", .path.display())]
    OutputExists { path: PathBuf },

    #[error("failed to write {}: {}", .path.display(), .source)]
    WriteFailed { path: PathBuf, source: io::Error },
}
