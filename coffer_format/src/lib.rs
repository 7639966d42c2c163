// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wire grammar for the coffer vault history format.
//!
//! A vault's persistent state is an append-only log of textual commands.
//! This crate owns the line-level grammar: the command manifest, the
//! argument codec, the builder, the tokenizer, and the share prefix.
//! Replay semantics live in `coffer_history`; the on-disk envelope lives
//! in `coffer_envelope`.
//!
//! # Example
//!
//! ```
//! use coffer_format::{build_command, decode_arguments, tokenize, CommandKind};
//!
//! let line = build_command(CommandKind::SetGroupTitle, &["g1", "My Folder"]).unwrap();
//! let tokenized = tokenize(&line).unwrap();
//! assert_eq!(tokenized.short, "tgr");
//!
//! let args = decode_arguments(CommandKind::SetGroupTitle, &tokenized.args).unwrap();
//! assert_eq!(args, vec!["g1", "My Folder"]);
//! ```

pub mod builder;
pub mod codec;
pub mod error;
pub mod manifest;
pub mod share;
pub mod tokenizer;

pub use builder::build_command;
pub use codec::{decode_argument, decode_arguments, encode_argument, is_encoded, ENCODED_PREFIX};
pub use error::{FormatError, Result};
pub use manifest::{ArgKind, ArgSpec, CommandKind, CommandSpec, DEFAULT_FORMAT};
pub use share::{is_share_id, prefix_share_line, split_share_prefix, SHARE_ID_LEN};
pub use tokenizer::{is_valid_command_line, tokenize, TokenizedCommand};
