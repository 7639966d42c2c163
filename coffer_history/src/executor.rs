// SPDX-License-Identifier: MIT OR Apache-2.0
//! History executor: owns a dataset and the command log that produced it.
//!
//! Commands arrive as text lines, run through a fixed pipeline (share
//! split, validate, tokenize, manifest lookup, decode, execute) and are
//! appended verbatim to the history on success. Every committed batch
//! ends with a `pad` line so history length does not leak batch sizes.
//!
//! A failing command aborts the remainder of its batch. Commands that
//! already ran stay applied and appended - there is no rollback. Callers
//! that need atomicity take a [`HistoryExecutor::snapshot`] first and
//! swap it back in on failure.

use std::fmt;

use coffer_format::{
    build_command, decode_arguments, split_share_prefix, tokenize, CommandKind, FormatError,
    DEFAULT_FORMAT,
};

use crate::dataset::Dataset;
use crate::error::{ExecError, HistoryError, Result};
use crate::executors::{apply_command, ExecOptions};
use crate::flatten::Flattener;

/// Payload of the `commandsExecuted` change signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandsExecuted {
    /// Number of commands applied by the batch, including the auto-pad.
    pub count: usize,
}

type Subscriber = Box<dyn Fn(&CommandsExecuted) + Send + Sync>;

/// Generate a fresh vault/group/entry ID.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Replays and records vault mutation commands.
pub struct HistoryExecutor {
    dataset: Dataset,
    history: Vec<String>,
    dirty: bool,
    read_only: bool,
    subscribers: Vec<Subscriber>,
}

impl Default for HistoryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HistoryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryExecutor")
            .field("history_len", &self.history.len())
            .field("dirty", &self.dirty)
            .field("read_only", &self.read_only)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl HistoryExecutor {
    /// Empty executor with an empty dataset and history.
    pub fn new() -> Self {
        Self {
            dataset: Dataset::new(),
            history: Vec::new(),
            dirty: false,
            read_only: false,
            subscribers: Vec::new(),
        }
    }

    /// Rebuild an executor from a stored history.
    ///
    /// Lines replay exactly as given: no auto-pad is appended, the dirty
    /// flag stays clear, and no change signal fires. A corrupt line
    /// aborts the replay.
    pub fn replay<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut executor = Self::new();
        for line in lines {
            executor.apply_line(line.as_ref())?;
        }
        tracing::debug!(lines = executor.history.len(), "replayed history");
        Ok(executor)
    }

    /// Initialise an empty vault: declare the format, assign a fresh
    /// vault ID, and leave a comment banner. Returns the vault ID.
    pub fn initialise(&mut self) -> Result<String> {
        let vault_id = generate_id();
        let batch = vec![
            build_command(CommandKind::Format, &[DEFAULT_FORMAT])?,
            build_command(CommandKind::SetVaultId, &[vault_id.as_str()])?,
            build_command(CommandKind::Comment, &["vault created"])?,
        ];
        self.execute(&batch)?;
        Ok(vault_id)
    }

    /// Execute one or many command lines as a single batch.
    ///
    /// On success the batch is appended to history followed by an
    /// auto-`pad` (unless the batch itself ended with one) and the
    /// `commandsExecuted` signal fires once. The dirty flag is set as
    /// soon as the first command applies, so it stays accurate when a
    /// later command aborts the batch.
    pub fn execute<I, S>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.read_only {
            return Err(HistoryError::ReadOnly);
        }
        let mut count = 0usize;
        let mut last = None;
        for command in commands {
            last = Some(self.apply_line(command.as_ref())?);
            self.dirty = true;
            count += 1;
        }
        if count == 0 {
            return Ok(());
        }
        if last != Some(CommandKind::Pad) {
            let pad = build_command(CommandKind::Pad, &[generate_id().as_str()])?;
            self.apply_line(&pad)?;
            count += 1;
        }
        tracing::debug!(commands = count, "executed batch");
        let event = CommandsExecuted { count };
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
        Ok(())
    }

    /// Execute a single command line as its own batch.
    pub fn execute_one(&mut self, command: &str) -> Result<()> {
        self.execute([command])
    }

    /// Reset dataset and history to empty and clear the dirty flag.
    pub fn clear(&mut self) -> Result<()> {
        if self.read_only {
            return Err(HistoryError::ReadOnly);
        }
        self.dataset.reset();
        self.history.clear();
        self.dirty = false;
        Ok(())
    }

    /// The materialised dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The command log, in application order.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Whether unsaved mutations exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether mutations are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Toggle the read-only gate.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Read-only copy of the current state. Subscribers do not carry
    /// over.
    pub fn snapshot(&self) -> Self {
        Self {
            dataset: self.dataset.clone(),
            history: self.history.clone(),
            dirty: false,
            read_only: true,
            subscribers: Vec::new(),
        }
    }

    /// Subscribe to the `commandsExecuted` signal.
    pub fn on_commands_executed<F>(&mut self, subscriber: F)
    where
        F: Fn(&CommandsExecuted) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Flatten the history when it is long enough to be worth it.
    /// Returns whether a flatten happened.
    pub fn optimise(&mut self) -> Result<bool> {
        let mut flattener = Flattener::new(self);
        if !flattener.can_be_flattened() {
            return Ok(false);
        }
        flattener.flatten()?;
        Ok(true)
    }

    // -- collaborator surface: builder-then-execute wrappers --

    /// Create a group under `parent_id` and return its generated ID.
    pub fn create_group(&mut self, parent_id: &str) -> Result<String> {
        let id = generate_id();
        let line = build_command(CommandKind::CreateGroup, &[parent_id, id.as_str()])?;
        self.execute_one(&line)?;
        Ok(id)
    }

    /// Create an entry in `group_id` and return its generated ID.
    pub fn create_entry(&mut self, group_id: &str) -> Result<String> {
        let id = generate_id();
        let line = build_command(CommandKind::CreateEntry, &[group_id, id.as_str()])?;
        self.execute_one(&line)?;
        Ok(id)
    }

    /// Move a group beneath a new parent.
    pub fn move_group(&mut self, group_id: &str, new_parent_id: &str) -> Result<()> {
        let line = build_command(CommandKind::MoveGroup, &[group_id, new_parent_id])?;
        self.execute_one(&line)
    }

    /// Move an entry into another group.
    pub fn move_entry(&mut self, entry_id: &str, new_group_id: &str) -> Result<()> {
        let line = build_command(CommandKind::MoveEntry, &[entry_id, new_group_id])?;
        self.execute_one(&line)
    }

    /// Delete a group and everything beneath it.
    pub fn delete_group(&mut self, group_id: &str) -> Result<()> {
        let line = build_command(CommandKind::DeleteGroup, &[group_id])?;
        self.execute_one(&line)
    }

    /// Delete an entry.
    pub fn delete_entry(&mut self, entry_id: &str) -> Result<()> {
        let line = build_command(CommandKind::DeleteEntry, &[entry_id])?;
        self.execute_one(&line)
    }

    /// Set a group's title.
    pub fn set_group_title(&mut self, group_id: &str, title: &str) -> Result<()> {
        let line = build_command(CommandKind::SetGroupTitle, &[group_id, title])?;
        self.execute_one(&line)
    }

    /// Set an entry property.
    pub fn set_entry_property(&mut self, entry_id: &str, key: &str, value: &str) -> Result<()> {
        let line = build_command(CommandKind::SetEntryProperty, &[entry_id, key, value])?;
        self.execute_one(&line)
    }

    /// Delete an entry property.
    pub fn delete_entry_property(&mut self, entry_id: &str, key: &str) -> Result<()> {
        let line = build_command(CommandKind::DeleteEntryProperty, &[entry_id, key])?;
        self.execute_one(&line)
    }

    /// Set an entry attribute.
    pub fn set_entry_attribute(&mut self, entry_id: &str, key: &str, value: &str) -> Result<()> {
        let line = build_command(CommandKind::SetEntryAttribute, &[entry_id, key, value])?;
        self.execute_one(&line)
    }

    /// Delete an entry attribute.
    pub fn delete_entry_attribute(&mut self, entry_id: &str, key: &str) -> Result<()> {
        let line = build_command(CommandKind::DeleteEntryAttribute, &[entry_id, key])?;
        self.execute_one(&line)
    }

    /// Set a group attribute.
    pub fn set_group_attribute(&mut self, group_id: &str, key: &str, value: &str) -> Result<()> {
        let line = build_command(CommandKind::SetGroupAttribute, &[group_id, key, value])?;
        self.execute_one(&line)
    }

    /// Delete a group attribute.
    pub fn delete_group_attribute(&mut self, group_id: &str, key: &str) -> Result<()> {
        let line = build_command(CommandKind::DeleteGroupAttribute, &[group_id, key])?;
        self.execute_one(&line)
    }

    /// Set a vault-level attribute.
    pub fn set_vault_attribute(&mut self, key: &str, value: &str) -> Result<()> {
        let line = build_command(CommandKind::SetVaultAttribute, &[key, value])?;
        self.execute_one(&line)
    }

    /// Delete a vault-level attribute.
    pub fn delete_vault_attribute(&mut self, key: &str) -> Result<()> {
        let line = build_command(CommandKind::DeleteVaultAttribute, &[key])?;
        self.execute_one(&line)
    }

    /// All group IDs with their nodes.
    pub fn get_all_groups(&self) -> Vec<(&str, &crate::dataset::GroupNode)> {
        self.dataset.all_groups().collect()
    }

    /// All entry IDs with their nodes.
    pub fn get_all_entries(&self) -> Vec<(&str, &crate::dataset::EntryNode)> {
        self.dataset.all_entries().collect()
    }

    /// The vault ID, if set.
    pub fn get_vault_id(&self) -> Option<&str> {
        self.dataset.vault_id()
    }

    pub(crate) fn restore_state(&mut self, dataset: Dataset, history: Vec<String>, dirty: bool) {
        self.dataset = dataset;
        self.history = history;
        self.dirty = dirty;
    }

    /// Single-command pipeline. Appends the original line (share prefix
    /// included) on success and returns the executed kind.
    fn apply_line(&mut self, line: &str) -> Result<CommandKind> {
        let (share_id, command) = split_share_prefix(line);
        let tokenized = tokenize(command)?;
        let kind = CommandKind::from_short(&tokenized.short)
            .ok_or_else(|| FormatError::UnknownCommand(tokenized.short.clone()))?;
        let args = decode_arguments(kind, &tokenized.args).map_err(|e| {
            HistoryError::CommandExecution {
                key: kind.short().to_string(),
                source: ExecError::Decode(e),
            }
        })?;
        apply_command(&mut self.dataset, kind, ExecOptions { share_id }, &args).map_err(
            |source| HistoryError::CommandExecution {
                key: kind.short().to_string(),
                source,
            },
        )?;
        self.history.push(line.to_string());
        Ok(kind)
    }
}
