use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while opening, building or searching a suffix array.
#[derive(Debug, Error)]
pub enum SaryError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "array file {path} has length {len}, not a positive multiple of the entry width {width}"
    )]
    MalformedArray {
        path: PathBuf,
        len: u64,
        width: usize,
    },

    #[error("text and array files must not be empty independently of each other: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, SaryError>;
