// SPDX-License-Identifier: MIT OR Apache-2.0
//! Merge preprocessing for divergent histories.
//!
//! Replay-merging two histories concatenates their divergent tails over
//! the shared base. Destructive commands are stripped from both tails
//! first, so the merged replay keeps the union of creations and the
//! last writer's property/attribute sets. Moves stay: they are
//! order-sensitive but not destructive.

use coffer_format::{split_share_prefix, tokenize, CommandKind, FormatError};

use crate::error::Result;

/// Remove destructive commands from a history.
///
/// Share prefixes are honoured: classification looks at the command
/// behind the prefix, and kept lines keep their prefix. The operation
/// is idempotent. A line that does not parse aborts with an error
/// rather than passing through silently.
pub fn strip_destructive_commands<S: AsRef<str>>(history: &[S]) -> Result<Vec<String>> {
    let mut kept = Vec::with_capacity(history.len());
    for line in history {
        let line = line.as_ref();
        let (_, command) = split_share_prefix(line);
        let tokenized = tokenize(command)?;
        let kind = CommandKind::from_short(&tokenized.short)
            .ok_or_else(|| FormatError::UnknownCommand(tokenized.short.clone()))?;
        if !kind.is_destructive() {
            kept.push(line.to_string());
        }
    }
    Ok(kept)
}

/// Merge two divergent histories into one replayable log.
///
/// The longest common line prefix is the shared base; both tails are
/// stripped of destructive commands and appended, ours first.
pub fn merge_histories<S: AsRef<str>>(ours: &[S], theirs: &[S]) -> Result<Vec<String>> {
    let common = ours
        .iter()
        .zip(theirs.iter())
        .take_while(|(a, b)| a.as_ref() == b.as_ref())
        .count();

    let mut merged: Vec<String> = ours[..common]
        .iter()
        .map(|line| line.as_ref().to_string())
        .collect();
    merged.extend(strip_destructive_commands(&ours[common..])?);
    merged.extend(strip_destructive_commands(&theirs[common..])?);
    tracing::debug!(
        base = common,
        ours = ours.len() - common,
        theirs = theirs.len() - common,
        merged = merged.len(),
        "prepared merge history"
    );
    Ok(merged)
}
