// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory vault dataset: the state produced by replaying a history.
//!
//! Groups and entries live in flat arenas keyed by ID; tree shape is a
//! parent ID on each node plus ordered child-ID lists. No node owns
//! another, so the tree is cycle-free by construction and structural
//! equality is a plain `==`.
//!
//! Mutation methods are crate-private: all changes flow through the
//! command executors so that history replay remains the single source
//! of truth.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parent token of top-level groups.
pub const ROOT_GROUP_ID: &str = "0";

/// A group node in the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNode {
    /// Display title; empty until `tgr` runs.
    pub title: String,
    /// Owning group ID, or [`ROOT_GROUP_ID`].
    pub parent: String,
    /// Group-level metadata.
    pub attributes: BTreeMap<String, String>,
    /// Ordered child group IDs.
    pub child_groups: Vec<String>,
    /// Ordered child entry IDs.
    pub child_entries: Vec<String>,
    /// Share the creating command belonged to, if any.
    pub share_id: Option<String>,
}

/// An entry node in the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryNode {
    /// Owning group ID.
    pub parent: String,
    /// User-visible key/value data (`title`, `username`, `password`, ...).
    pub properties: BTreeMap<String, String>,
    /// System-managed metadata.
    pub attributes: BTreeMap<String, String>,
    /// Share the creating command belonged to, if any.
    pub share_id: Option<String>,
}

/// Materialised vault state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    vault_id: Option<String>,
    format: Option<String>,
    attributes: BTreeMap<String, String>,
    groups: BTreeMap<String, GroupNode>,
    entries: BTreeMap<String, EntryNode>,
    root_groups: Vec<String>,
}

impl Dataset {
    /// Fresh empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vault UUID, if an `aid` has replayed.
    pub fn vault_id(&self) -> Option<&str> {
        self.vault_id.as_deref()
    }

    /// Format tag, if an `fmt` has replayed.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Vault-level attributes.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Look up a group by ID.
    pub fn group(&self, id: &str) -> Option<&GroupNode> {
        self.groups.get(id)
    }

    /// Look up an entry by ID.
    pub fn entry(&self, id: &str) -> Option<&EntryNode> {
        self.entries.get(id)
    }

    /// Whether a group with this ID exists.
    pub fn has_group(&self, id: &str) -> bool {
        self.groups.contains_key(id)
    }

    /// Whether an entry with this ID exists.
    pub fn has_entry(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Whether `parent` is a valid parent token for a group.
    pub fn is_valid_group_parent(&self, parent: &str) -> bool {
        parent == ROOT_GROUP_ID || self.has_group(parent)
    }

    /// IDs of top-level groups, in creation order.
    pub fn root_groups(&self) -> &[String] {
        &self.root_groups
    }

    /// All groups with their IDs, in arena order.
    pub fn all_groups(&self) -> impl Iterator<Item = (&str, &GroupNode)> {
        self.groups.iter().map(|(id, node)| (id.as_str(), node))
    }

    /// All entries with their IDs, in arena order.
    pub fn all_entries(&self) -> impl Iterator<Item = (&str, &EntryNode)> {
        self.entries.iter().map(|(id, node)| (id.as_str(), node))
    }

    /// Child groups of a parent token, resolved in order.
    pub fn child_groups(&self, parent: &str) -> Vec<(&str, &GroupNode)> {
        let ids = if parent == ROOT_GROUP_ID {
            &self.root_groups
        } else {
            match self.groups.get(parent) {
                Some(node) => &node.child_groups,
                None => return Vec::new(),
            }
        };
        ids.iter()
            .filter_map(|id| self.groups.get(id).map(|node| (id.as_str(), node)))
            .collect()
    }

    /// Entries of a group, resolved in order.
    pub fn entries_of(&self, group: &str) -> Vec<(&str, &EntryNode)> {
        match self.groups.get(group) {
            Some(node) => node
                .child_entries
                .iter()
                .filter_map(|id| self.entries.get(id).map(|entry| (id.as_str(), entry)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether `candidate` sits somewhere beneath `ancestor`.
    pub fn is_descendant(&self, ancestor: &str, candidate: &str) -> bool {
        let mut current = candidate;
        while let Some(node) = self.groups.get(current) {
            if node.parent == ancestor {
                return true;
            }
            if node.parent == ROOT_GROUP_ID {
                return false;
            }
            current = &node.parent;
        }
        false
    }

    /// Whether nothing has replayed into this dataset.
    pub fn is_empty(&self) -> bool {
        self.vault_id.is_none()
            && self.format.is_none()
            && self.attributes.is_empty()
            && self.groups.is_empty()
            && self.entries.is_empty()
    }

    // -- crate-private mutation, called by the command executors --

    pub(crate) fn set_vault_id(&mut self, id: &str) {
        self.vault_id = Some(id.to_string());
    }

    pub(crate) fn set_format(&mut self, tag: &str) {
        self.format = Some(tag.to_string());
    }

    pub(crate) fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn remove_attribute(&mut self, key: &str) -> bool {
        self.attributes.remove(key).is_some()
    }

    pub(crate) fn insert_group(&mut self, id: &str, parent: &str, share_id: Option<&str>) {
        self.groups.insert(
            id.to_string(),
            GroupNode {
                parent: parent.to_string(),
                share_id: share_id.map(str::to_string),
                ..GroupNode::default()
            },
        );
        self.attach_group(parent, id);
    }

    pub(crate) fn remove_group_recursive(&mut self, id: &str) {
        if let Some(parent) = self.groups.get(id).map(|g| g.parent.clone()) {
            self.detach_group(&parent, id);
        }
        let mut stack = vec![id.to_string()];
        while let Some(group_id) = stack.pop() {
            if let Some(node) = self.groups.remove(&group_id) {
                for entry_id in node.child_entries {
                    self.entries.remove(&entry_id);
                }
                stack.extend(node.child_groups);
            }
        }
    }

    pub(crate) fn move_group(&mut self, id: &str, new_parent: &str) {
        let Some(old_parent) = self.groups.get(id).map(|g| g.parent.clone()) else {
            return;
        };
        self.detach_group(&old_parent, id);
        if let Some(node) = self.groups.get_mut(id) {
            node.parent = new_parent.to_string();
        }
        self.attach_group(new_parent, id);
    }

    pub(crate) fn group_mut(&mut self, id: &str) -> Option<&mut GroupNode> {
        self.groups.get_mut(id)
    }

    pub(crate) fn insert_entry(&mut self, id: &str, group: &str, share_id: Option<&str>) {
        self.entries.insert(
            id.to_string(),
            EntryNode {
                parent: group.to_string(),
                share_id: share_id.map(str::to_string),
                ..EntryNode::default()
            },
        );
        if let Some(node) = self.groups.get_mut(group) {
            node.child_entries.push(id.to_string());
        }
    }

    pub(crate) fn remove_entry(&mut self, id: &str) {
        if let Some(entry) = self.entries.remove(id) {
            if let Some(group) = self.groups.get_mut(&entry.parent) {
                group.child_entries.retain(|e| e != id);
            }
        }
    }

    pub(crate) fn move_entry(&mut self, id: &str, new_group: &str) {
        let Some(old_group) = self.entries.get(id).map(|e| e.parent.clone()) else {
            return;
        };
        if let Some(group) = self.groups.get_mut(&old_group) {
            group.child_entries.retain(|e| e != id);
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.parent = new_group.to_string();
        }
        if let Some(group) = self.groups.get_mut(new_group) {
            group.child_entries.push(id.to_string());
        }
    }

    pub(crate) fn entry_mut(&mut self, id: &str) -> Option<&mut EntryNode> {
        self.entries.get_mut(id)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn attach_group(&mut self, parent: &str, id: &str) {
        if parent == ROOT_GROUP_ID {
            self.root_groups.push(id.to_string());
        } else if let Some(node) = self.groups.get_mut(parent) {
            node.child_groups.push(id.to_string());
        }
    }

    fn detach_group(&mut self, parent: &str, id: &str) {
        if parent == ROOT_GROUP_ID {
            self.root_groups.retain(|g| g != id);
        } else if let Some(node) = self.groups.get_mut(parent) {
            node.child_groups.retain(|g| g != id);
        }
    }
}
