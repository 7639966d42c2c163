// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for history replay and mutation.

use coffer_format::FormatError;
use thiserror::Error;

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors raised by the history executor and its helpers.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Mutation attempted on a read-only executor.
    #[error("history is read-only")]
    ReadOnly,

    /// Line-level grammar failure (invalid or unknown command).
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A command failed during execution; `key` is the failing short key.
    #[error("command {key} failed: {source}")]
    CommandExecution {
        /// Short key of the failing command.
        key: String,
        /// Underlying execution failure.
        #[source]
        source: ExecError,
    },

    /// A group referenced by a non-command API does not exist.
    #[error("unknown group: {0}")]
    UnknownGroup(String),
}

/// Execution failures inside a single command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Referenced group does not exist.
    #[error("group not found: {0}")]
    GroupNotFound(String),

    /// Referenced entry does not exist.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// Create command reused an existing ID.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// Group move would place a group beneath its own descendant.
    #[error("cannot move group {group} beneath {target}")]
    CycleDetected {
        /// Group being moved.
        group: String,
        /// Requested new parent.
        target: String,
    },

    /// Referenced attribute does not exist.
    #[error("attribute not found: {0}")]
    AttributeNotFound(String),

    /// Referenced property does not exist.
    #[error("property not found: {0}")]
    PropertyNotFound(String),

    /// Wrong argument count or shape for the command.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Argument decoding failed.
    #[error("argument decode failed: {0}")]
    Decode(#[source] FormatError),
}
