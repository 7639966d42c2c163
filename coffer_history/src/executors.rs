// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command executors: one pure function per command kind.
//!
//! Each executor validates referential integrity against the dataset
//! before touching it, so a failing command leaves the dataset exactly
//! as it found it. Dispatch is an exhaustive match over `CommandKind`.

use coffer_format::CommandKind;

use crate::dataset::Dataset;
use crate::error::ExecError;

/// Options threaded from the history line to the executor.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ExecOptions<'a> {
    /// Share the line belongs to, when it carried a share prefix.
    pub share_id: Option<&'a str>,
}

type ExecResult = std::result::Result<(), ExecError>;

/// Apply one decoded command to the dataset.
pub(crate) fn apply_command(
    dataset: &mut Dataset,
    kind: CommandKind,
    opts: ExecOptions<'_>,
    args: &[String],
) -> ExecResult {
    match kind {
        CommandKind::SetVaultId => {
            let [id] = fixed(kind, args)?;
            dataset.set_vault_id(id);
            Ok(())
        }
        CommandKind::Comment => {
            let [_text] = fixed(kind, args)?;
            Ok(())
        }
        CommandKind::Format => {
            let [tag] = fixed(kind, args)?;
            dataset.set_format(tag);
            Ok(())
        }
        CommandKind::CreateGroup => {
            let [parent, id] = fixed(kind, args)?;
            create_group(dataset, opts, parent, id)
        }
        CommandKind::DeleteGroup => {
            let [id] = fixed(kind, args)?;
            require_group(dataset, id)?;
            dataset.remove_group_recursive(id);
            Ok(())
        }
        CommandKind::MoveGroup => {
            let [id, new_parent] = fixed(kind, args)?;
            move_group(dataset, id, new_parent)
        }
        CommandKind::SetGroupTitle => {
            let [id, title] = fixed(kind, args)?;
            require_group(dataset, id)?;
            if let Some(group) = dataset.group_mut(id) {
                group.title = title.to_string();
            }
            Ok(())
        }
        CommandKind::SetGroupAttribute => {
            let [id, key, value] = fixed(kind, args)?;
            require_group(dataset, id)?;
            if let Some(group) = dataset.group_mut(id) {
                group.attributes.insert(key.to_string(), value.to_string());
            }
            Ok(())
        }
        CommandKind::DeleteGroupAttribute => {
            let [id, key] = fixed(kind, args)?;
            require_group(dataset, id)?;
            let removed = dataset
                .group_mut(id)
                .map(|group| group.attributes.remove(key).is_some())
                .unwrap_or(false);
            if !removed {
                return Err(ExecError::AttributeNotFound(key.to_string()));
            }
            Ok(())
        }
        CommandKind::CreateEntry => {
            let [group, id] = fixed(kind, args)?;
            create_entry(dataset, opts, group, id)
        }
        CommandKind::DeleteEntry => {
            let [id] = fixed(kind, args)?;
            require_entry(dataset, id)?;
            dataset.remove_entry(id);
            Ok(())
        }
        CommandKind::MoveEntry => {
            let [id, group] = fixed(kind, args)?;
            require_entry(dataset, id)?;
            require_group(dataset, group)?;
            dataset.move_entry(id, group);
            Ok(())
        }
        CommandKind::SetEntryProperty | CommandKind::SetEntryMeta => {
            let [id, key, value] = fixed(kind, args)?;
            set_entry_property(dataset, id, key, value)
        }
        CommandKind::DeleteEntryProperty | CommandKind::DeleteEntryMeta => {
            let [id, key] = fixed(kind, args)?;
            delete_entry_property(dataset, id, key)
        }
        CommandKind::SetEntryAttribute => {
            let [id, key, value] = fixed(kind, args)?;
            require_entry(dataset, id)?;
            if let Some(entry) = dataset.entry_mut(id) {
                entry.attributes.insert(key.to_string(), value.to_string());
            }
            Ok(())
        }
        CommandKind::DeleteEntryAttribute => {
            let [id, key] = fixed(kind, args)?;
            require_entry(dataset, id)?;
            let removed = dataset
                .entry_mut(id)
                .map(|entry| entry.attributes.remove(key).is_some())
                .unwrap_or(false);
            if !removed {
                return Err(ExecError::AttributeNotFound(key.to_string()));
            }
            Ok(())
        }
        CommandKind::SetVaultAttribute => {
            let [key, value] = fixed(kind, args)?;
            dataset.set_attribute(key, value);
            Ok(())
        }
        CommandKind::DeleteVaultAttribute => {
            let [key] = fixed(kind, args)?;
            if !dataset.remove_attribute(key) {
                return Err(ExecError::AttributeNotFound(key.to_string()));
            }
            Ok(())
        }
        CommandKind::Pad => {
            let [_token] = fixed(kind, args)?;
            Ok(())
        }
    }
}

fn create_group(
    dataset: &mut Dataset,
    opts: ExecOptions<'_>,
    parent: &str,
    id: &str,
) -> ExecResult {
    if !dataset.is_valid_group_parent(parent) {
        return Err(ExecError::GroupNotFound(parent.to_string()));
    }
    if id == crate::dataset::ROOT_GROUP_ID {
        return Err(ExecError::InvalidArguments(
            "group id must not be the root token".to_string(),
        ));
    }
    if dataset.has_group(id) {
        return Err(ExecError::DuplicateId(id.to_string()));
    }
    dataset.insert_group(id, parent, opts.share_id);
    Ok(())
}

fn move_group(dataset: &mut Dataset, id: &str, new_parent: &str) -> ExecResult {
    require_group(dataset, id)?;
    if !dataset.is_valid_group_parent(new_parent) {
        return Err(ExecError::GroupNotFound(new_parent.to_string()));
    }
    if id == new_parent || dataset.is_descendant(id, new_parent) {
        return Err(ExecError::CycleDetected {
            group: id.to_string(),
            target: new_parent.to_string(),
        });
    }
    dataset.move_group(id, new_parent);
    Ok(())
}

fn create_entry(
    dataset: &mut Dataset,
    opts: ExecOptions<'_>,
    group: &str,
    id: &str,
) -> ExecResult {
    require_group(dataset, group)?;
    if dataset.has_entry(id) {
        return Err(ExecError::DuplicateId(id.to_string()));
    }
    dataset.insert_entry(id, group, opts.share_id);
    Ok(())
}

fn set_entry_property(dataset: &mut Dataset, id: &str, key: &str, value: &str) -> ExecResult {
    require_entry(dataset, id)?;
    if let Some(entry) = dataset.entry_mut(id) {
        entry.properties.insert(key.to_string(), value.to_string());
    }
    Ok(())
}

fn delete_entry_property(dataset: &mut Dataset, id: &str, key: &str) -> ExecResult {
    require_entry(dataset, id)?;
    let removed = dataset
        .entry_mut(id)
        .map(|entry| entry.properties.remove(key).is_some())
        .unwrap_or(false);
    if !removed {
        return Err(ExecError::PropertyNotFound(key.to_string()));
    }
    Ok(())
}

fn require_group(dataset: &Dataset, id: &str) -> ExecResult {
    if dataset.has_group(id) {
        Ok(())
    } else {
        Err(ExecError::GroupNotFound(id.to_string()))
    }
}

fn require_entry(dataset: &Dataset, id: &str) -> ExecResult {
    if dataset.has_entry(id) {
        Ok(())
    } else {
        Err(ExecError::EntryNotFound(id.to_string()))
    }
}

fn fixed<'a, const N: usize>(
    kind: CommandKind,
    args: &'a [String],
) -> std::result::Result<[&'a str; N], ExecError> {
    if args.len() != N {
        return Err(ExecError::InvalidArguments(format!(
            "{} expects {} arguments, got {}",
            kind.short(),
            N,
            args.len()
        )));
    }
    let mut out = [""; N];
    for (slot, value) in out.iter_mut().zip(args) {
        *slot = value.as_str();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ROOT_GROUP_ID;

    fn apply(dataset: &mut Dataset, kind: CommandKind, args: &[&str]) -> ExecResult {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        apply_command(dataset, kind, ExecOptions::default(), &args)
    }

    #[test]
    fn test_create_group_at_root() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap();
        assert!(dataset.has_group("g1"));
        assert_eq!(dataset.group("g1").unwrap().parent, ROOT_GROUP_ID);
    }

    #[test]
    fn test_create_group_missing_parent_fails() {
        let mut dataset = Dataset::new();
        let err = apply(&mut dataset, CommandKind::CreateGroup, &["nope", "g1"]).unwrap_err();
        assert!(matches!(err, ExecError::GroupNotFound(_)));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_create_group_duplicate_id_fails() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap();
        let err =
            apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap_err();
        assert!(matches!(err, ExecError::DuplicateId(_)));
    }

    #[test]
    fn test_create_entry_missing_group_fails() {
        let mut dataset = Dataset::new();
        let err = apply(&mut dataset, CommandKind::CreateEntry, &["g1", "e1"]).unwrap_err();
        assert!(matches!(err, ExecError::GroupNotFound(_)));
    }

    #[test]
    fn test_move_group_beneath_descendant_fails() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap();
        apply(&mut dataset, CommandKind::CreateGroup, &["g1", "g2"]).unwrap();
        let err = apply(&mut dataset, CommandKind::MoveGroup, &["g1", "g2"]).unwrap_err();
        assert!(matches!(err, ExecError::CycleDetected { .. }));
        let err = apply(&mut dataset, CommandKind::MoveGroup, &["g1", "g1"]).unwrap_err();
        assert!(matches!(err, ExecError::CycleDetected { .. }));
    }

    #[test]
    fn test_delete_group_removes_descendants() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap();
        apply(&mut dataset, CommandKind::CreateGroup, &["g1", "g2"]).unwrap();
        apply(&mut dataset, CommandKind::CreateEntry, &["g2", "e1"]).unwrap();
        apply(&mut dataset, CommandKind::DeleteGroup, &["g1"]).unwrap();
        assert!(dataset.all_groups().next().is_none());
        assert!(dataset.all_entries().next().is_none());
    }

    #[test]
    fn test_meta_alias_routes_to_property() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap();
        apply(&mut dataset, CommandKind::CreateEntry, &["g1", "e1"]).unwrap();
        apply(&mut dataset, CommandKind::SetEntryMeta, &["e1", "note", "hi"]).unwrap();
        assert_eq!(
            dataset.entry("e1").unwrap().properties.get("note"),
            Some(&"hi".to_string())
        );
        apply(&mut dataset, CommandKind::DeleteEntryMeta, &["e1", "note"]).unwrap();
        assert!(dataset.entry("e1").unwrap().properties.is_empty());
    }

    #[test]
    fn test_delete_missing_attribute_fails() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap();
        let err = apply(&mut dataset, CommandKind::DeleteGroupAttribute, &["g1", "x"]).unwrap_err();
        assert!(matches!(err, ExecError::AttributeNotFound(_)));
        let err = apply(&mut dataset, CommandKind::DeleteVaultAttribute, &["x"]).unwrap_err();
        assert!(matches!(err, ExecError::AttributeNotFound(_)));
    }

    #[test]
    fn test_vault_attributes() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::SetVaultAttribute, &["theme", "dark"]).unwrap();
        assert_eq!(dataset.attributes().get("theme"), Some(&"dark".to_string()));
        apply(&mut dataset, CommandKind::DeleteVaultAttribute, &["theme"]).unwrap();
        assert!(dataset.attributes().is_empty());
    }

    #[test]
    fn test_share_id_recorded_on_create() {
        let mut dataset = Dataset::new();
        let opts = ExecOptions {
            share_id: Some("share-1"),
        };
        apply_command(
            &mut dataset,
            CommandKind::CreateGroup,
            opts,
            &[ROOT_GROUP_ID.to_string(), "g1".to_string()],
        )
        .unwrap();
        assert_eq!(dataset.group("g1").unwrap().share_id.as_deref(), Some("share-1"));
    }

    #[test]
    fn test_arity_mismatch_fails() {
        let mut dataset = Dataset::new();
        let err = apply(&mut dataset, CommandKind::CreateGroup, &["0"]).unwrap_err();
        assert!(matches!(err, ExecError::InvalidArguments(_)));
    }

    #[test]
    fn test_wrong_kind_reference_fails() {
        let mut dataset = Dataset::new();
        apply(&mut dataset, CommandKind::CreateGroup, &[ROOT_GROUP_ID, "g1"]).unwrap();
        // Entry commands must not resolve group IDs.
        let err = apply(&mut dataset, CommandKind::DeleteEntry, &["g1"]).unwrap_err();
        assert!(matches!(err, ExecError::EntryNotFound(_)));
    }
}
