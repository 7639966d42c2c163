// SPDX-License-Identifier: MIT OR Apache-2.0
//! Describe generator: emits the command sequence that reconstructs a
//! dataset or group subtree.
//!
//! Output order per group: `cgr`, `tgr` when a title is set, `sga` per
//! attribute, then each entry as `cen` + `sep` + `sea`, then child
//! groups recursively. Creations that originated in a share are
//! re-emitted with their share prefix so replay restores provenance.

use coffer_format::{build_command, prefix_share_line, CommandKind};

use crate::dataset::{Dataset, EntryNode, GroupNode, ROOT_GROUP_ID};
use crate::error::{HistoryError, Result};

/// Describe a full dataset: format, vault ID, vault attributes, then
/// every root subtree. Replaying the output against an empty dataset
/// reproduces the input.
pub fn describe_dataset(dataset: &Dataset) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    if let Some(tag) = dataset.format() {
        lines.push(build_command(CommandKind::Format, &[tag])?);
    }
    if let Some(vault_id) = dataset.vault_id() {
        lines.push(build_command(CommandKind::SetVaultId, &[vault_id])?);
    }
    for (key, value) in dataset.attributes() {
        lines.push(build_command(
            CommandKind::SetVaultAttribute,
            &[key.as_str(), value.as_str()],
        )?);
    }
    for (id, group) in dataset.child_groups(ROOT_GROUP_ID) {
        describe_group_into(dataset, id, group, &mut lines)?;
    }
    Ok(lines)
}

/// Describe one group subtree. Replaying the output reproduces the
/// subtree, provided the group's parent already exists.
pub fn describe_group_subtree(dataset: &Dataset, group_id: &str) -> Result<Vec<String>> {
    let group = dataset
        .group(group_id)
        .ok_or_else(|| HistoryError::UnknownGroup(group_id.to_string()))?;
    let mut lines = Vec::new();
    describe_group_into(dataset, group_id, group, &mut lines)?;
    Ok(lines)
}

fn describe_group_into(
    dataset: &Dataset,
    id: &str,
    group: &GroupNode,
    lines: &mut Vec<String>,
) -> Result<()> {
    let create = build_command(CommandKind::CreateGroup, &[group.parent.as_str(), id])?;
    lines.push(match &group.share_id {
        Some(share) => prefix_share_line(share, &create),
        None => create,
    });
    if !group.title.is_empty() {
        lines.push(build_command(
            CommandKind::SetGroupTitle,
            &[id, group.title.as_str()],
        )?);
    }
    for (key, value) in &group.attributes {
        lines.push(build_command(
            CommandKind::SetGroupAttribute,
            &[id, key.as_str(), value.as_str()],
        )?);
    }
    for (entry_id, entry) in dataset.entries_of(id) {
        describe_entry_into(id, entry_id, entry, lines)?;
    }
    for (child_id, child) in dataset.child_groups(id) {
        describe_group_into(dataset, child_id, child, lines)?;
    }
    Ok(())
}

fn describe_entry_into(
    group_id: &str,
    entry_id: &str,
    entry: &EntryNode,
    lines: &mut Vec<String>,
) -> Result<()> {
    let create = build_command(CommandKind::CreateEntry, &[group_id, entry_id])?;
    lines.push(match &entry.share_id {
        Some(share) => prefix_share_line(share, &create),
        None => create,
    });
    for (key, value) in &entry.properties {
        lines.push(build_command(
            CommandKind::SetEntryProperty,
            &[entry_id, key.as_str(), value.as_str()],
        )?);
    }
    for (key, value) in &entry.attributes {
        lines.push(build_command(
            CommandKind::SetEntryAttribute,
            &[entry_id, key.as_str(), value.as_str()],
        )?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::HistoryExecutor;

    fn populated() -> HistoryExecutor {
        let mut executor = HistoryExecutor::new();
        executor
            .execute([
                "fmt coffer/a",
                "aid 22222222-2222-2222-2222-222222222222",
                "saa theme \"b64:ZGFyaw==\"",
                "cgr 0 g1",
                "tgr g1 \"b64:RW1haWw=\"",
                "sga g1 color \"b64:Ymx1ZQ==\"",
                "cen g1 e1",
                "sep e1 username \"b64:c2Ft\"",
                "sea e1 created \"b64:MjAyNA==\"",
                "cgr g1 g2",
                "cen g2 e2",
            ])
            .unwrap();
        executor
    }

    #[test]
    fn test_describe_dataset_replays_to_equal_state() {
        let executor = populated();
        let described = describe_dataset(executor.dataset()).unwrap();
        let replayed = HistoryExecutor::replay(&described).unwrap();
        assert_eq!(replayed.dataset(), executor.dataset());
    }

    #[test]
    fn test_describe_emits_create_before_detail() {
        let executor = populated();
        let described = describe_dataset(executor.dataset()).unwrap();
        let cgr = described.iter().position(|l| l.starts_with("cgr 0 g1")).unwrap();
        let tgr = described.iter().position(|l| l.starts_with("tgr g1")).unwrap();
        let cen = described.iter().position(|l| l.starts_with("cen g1 e1")).unwrap();
        assert!(cgr < tgr && tgr < cen);
    }

    #[test]
    fn test_describe_subtree_requires_known_group() {
        let executor = populated();
        assert!(matches!(
            describe_group_subtree(executor.dataset(), "missing"),
            Err(HistoryError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_describe_subtree_replays_under_existing_parent() {
        let executor = populated();
        let subtree = describe_group_subtree(executor.dataset(), "g2").unwrap();

        // g2 lives under g1, so replay needs g1 present first.
        let mut target = HistoryExecutor::new();
        target.execute_one("cgr 0 g1").unwrap();
        target.execute(&subtree).unwrap();

        assert!(target.dataset().has_group("g2"));
        assert!(target.dataset().has_entry("e2"));
        assert_eq!(target.dataset().entry("e2").unwrap().parent, "g2");
    }

    #[test]
    fn test_describe_preserves_share_provenance() {
        let share = "a81473a2-05b9-4c2b-9e63-7a8c24d0e1f2";
        let mut executor = HistoryExecutor::new();
        executor.execute_one("cgr 0 g1").unwrap();
        executor
            .execute_one(&format!("${share} cen g1 e1"))
            .unwrap();

        let described = describe_dataset(executor.dataset()).unwrap();
        assert!(described.iter().any(|l| l.starts_with(&format!("${share} cen"))));

        let replayed = HistoryExecutor::replay(&described).unwrap();
        assert_eq!(replayed.dataset(), executor.dataset());
    }
}
