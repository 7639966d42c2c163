// SPDX-License-Identifier: MIT OR Apache-2.0
//! History executor for the coffer vault format.
//!
//! Replays the append-only command log defined by `coffer_format` into
//! an in-memory dataset of nested groups and entries, and owns the
//! mutation surface layered on top of it:
//!
//! - [`HistoryExecutor`] - the replay/execute pipeline with auto-padding,
//!   a dirty flag, a read-only gate, and the `commandsExecuted` signal
//! - [`demux_history`] - partition a history by share ID
//! - [`strip_destructive_commands`] / [`merge_histories`] - merge
//!   preprocessing over divergent logs
//! - [`Flattener`] - replace a long history with a describe-equivalent
//!   minimal one
//! - [`describe_dataset`] / [`describe_group_subtree`] - emit the
//!   command sequence that rebuilds current state

pub mod dataset;
pub mod demux;
pub mod describe;
pub mod error;
pub mod executor;
mod executors;
pub mod flatten;
pub mod merge;

pub use dataset::{Dataset, EntryNode, GroupNode, ROOT_GROUP_ID};
pub use demux::{demux_history, DemuxedHistory};
pub use describe::{describe_dataset, describe_group_subtree};
pub use error::{ExecError, HistoryError, Result};
pub use executor::{generate_id, CommandsExecuted, HistoryExecutor};
pub use flatten::{Flattener, FLATTEN_THRESHOLD};
pub use merge::{merge_histories, strip_destructive_commands};
