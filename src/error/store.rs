//! Store error module.
//!
//! Failures while loading declaration data. Parsing itself cannot fail;
//! only getting the text can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading declarations into the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The declaration file could not be read or is not UTF-8.
    #[error("Failed to read declarations from {path}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The declaration file exceeds the configured size limit.
    #[error("Declaration file {path} is {size} bytes, limit is {limit}")]
    InputTooLarge {
        /// File that was rejected
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: usize,
    },
}
