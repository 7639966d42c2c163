// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the coffer wire grammar.

use thiserror::Error;

/// Result type for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors raised while parsing or building history lines.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Line does not match the command grammar.
    #[error("invalid command: {0:?}")]
    InvalidCommand(String),

    /// Short key has no entry in the command manifest.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// Argument cannot be encoded or decoded.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
