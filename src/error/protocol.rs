//! Protocol error module.
//!
//! This module defines error types raised while interpreting commands of the
//! line-oriented stdio protocol.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    /// The command word is not recognized.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The command needs an argument that was not given.
    #[error("Missing argument for '{command}': {argument}")]
    MissingArgument {
        /// Command that was issued
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    /// The line exceeds the maximum allowed size.
    #[error("Line size exceeds maximum allowed: {size} > {max_size}")]
    LineTooLong {
        /// The actual size of the line in bytes
        size: usize,
        /// The maximum allowed size in bytes
        max_size: usize,
    },

    /// The line is not valid UTF-8.
    #[error("Line is not valid UTF-8")]
    InvalidEncoding,

    /// A `load` block grew past the input limit.
    #[error("Load block exceeds maximum allowed size: {max_size} bytes")]
    BlockTooLarge {
        /// The maximum allowed size in bytes
        max_size: usize,
    },

    /// Input ended inside a `load` block.
    #[error("Load block not terminated with '.'")]
    UnterminatedBlock,
}
