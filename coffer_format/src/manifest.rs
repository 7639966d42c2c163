// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command manifest: the closed set of wire commands and their argument
//! descriptors.
//!
//! Every history line starts with a three-letter short key. The manifest
//! maps each key to a [`CommandKind`] variant and declares, per argument,
//! a logical type tag and whether the value travels through the argument
//! codec. Dispatch elsewhere is an exhaustive match over [`CommandKind`];
//! [`CommandKind::from_short`] is the only string lookup in the pipeline.

/// Default format tag declared by a freshly initialised vault's `fmt` line.
pub const DEFAULT_FORMAT: &str = "coffer/a";

/// The closed set of history commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum CommandKind {
    /// `aid` - set the vault ID.
    SetVaultId,
    /// `cmm` - comment, replays as a no-op.
    Comment,
    /// `fmt` - declare the on-wire format tag.
    Format,
    /// `cgr` - create a group under a parent.
    CreateGroup,
    /// `dgr` - delete a group and its descendants.
    DeleteGroup,
    /// `mgr` - move a group to a new parent.
    MoveGroup,
    /// `tgr` - set a group title.
    SetGroupTitle,
    /// `sga` - set a group attribute.
    SetGroupAttribute,
    /// `dga` - delete a group attribute.
    DeleteGroupAttribute,
    /// `cen` - create an entry in a group.
    CreateEntry,
    /// `den` - delete an entry.
    DeleteEntry,
    /// `men` - move an entry to another group.
    MoveEntry,
    /// `sep` - set an entry property.
    SetEntryProperty,
    /// `dep` - delete an entry property.
    DeleteEntryProperty,
    /// `sea` - set an entry attribute.
    SetEntryAttribute,
    /// `dea` - delete an entry attribute.
    DeleteEntryAttribute,
    /// `sem` - deprecated alias, routes to the entry property setter.
    SetEntryMeta,
    /// `dem` - deprecated alias, routes to the entry property deleter.
    DeleteEntryMeta,
    /// `saa` - set a vault attribute.
    SetVaultAttribute,
    /// `daa` - delete a vault attribute.
    DeleteVaultAttribute,
    /// `pad` - padding line with a random opaque token.
    Pad,
}

/// Logical type tag for a command argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Opaque identifier token (vault, group, entry, or parent ID).
    Id,
    /// Attribute or property key.
    Key,
    /// Attribute, property, or title value.
    Value,
    /// Freeform text; surplus tokens re-join into this argument.
    Text,
    /// Opaque single token (pad filler, format tag).
    Token,
}

/// Descriptor for one positional argument.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    /// Human-readable argument name.
    pub name: &'static str,
    /// Logical type tag.
    pub kind: ArgKind,
    /// Whether the builder wraps the value in the encoded envelope.
    pub encoded: bool,
}

/// Manifest row for one command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// The command this row describes.
    pub kind: CommandKind,
    /// Three-letter wire key.
    pub short: &'static str,
    /// Ordered argument descriptors.
    pub args: &'static [ArgSpec],
}

const fn arg(name: &'static str, kind: ArgKind, encoded: bool) -> ArgSpec {
    ArgSpec {
        name,
        kind,
        encoded,
    }
}

/// The manifest table, indexed by `CommandKind` discriminant.
static SPECS: [CommandSpec; 21] = [
    CommandSpec {
        kind: CommandKind::SetVaultId,
        short: "aid",
        args: &[arg("vaultID", ArgKind::Id, false)],
    },
    CommandSpec {
        kind: CommandKind::Comment,
        short: "cmm",
        args: &[arg("text", ArgKind::Text, false)],
    },
    CommandSpec {
        kind: CommandKind::Format,
        short: "fmt",
        args: &[arg("tag", ArgKind::Token, false)],
    },
    CommandSpec {
        kind: CommandKind::CreateGroup,
        short: "cgr",
        args: &[
            arg("parentID", ArgKind::Id, false),
            arg("newGroupID", ArgKind::Id, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::DeleteGroup,
        short: "dgr",
        args: &[arg("groupID", ArgKind::Id, false)],
    },
    CommandSpec {
        kind: CommandKind::MoveGroup,
        short: "mgr",
        args: &[
            arg("groupID", ArgKind::Id, false),
            arg("newParentID", ArgKind::Id, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::SetGroupTitle,
        short: "tgr",
        args: &[
            arg("groupID", ArgKind::Id, false),
            arg("title", ArgKind::Value, true),
        ],
    },
    CommandSpec {
        kind: CommandKind::SetGroupAttribute,
        short: "sga",
        args: &[
            arg("groupID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
            arg("value", ArgKind::Value, true),
        ],
    },
    CommandSpec {
        kind: CommandKind::DeleteGroupAttribute,
        short: "dga",
        args: &[
            arg("groupID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::CreateEntry,
        short: "cen",
        args: &[
            arg("groupID", ArgKind::Id, false),
            arg("entryID", ArgKind::Id, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::DeleteEntry,
        short: "den",
        args: &[arg("entryID", ArgKind::Id, false)],
    },
    CommandSpec {
        kind: CommandKind::MoveEntry,
        short: "men",
        args: &[
            arg("entryID", ArgKind::Id, false),
            arg("newGroupID", ArgKind::Id, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::SetEntryProperty,
        short: "sep",
        args: &[
            arg("entryID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
            arg("value", ArgKind::Value, true),
        ],
    },
    CommandSpec {
        kind: CommandKind::DeleteEntryProperty,
        short: "dep",
        args: &[
            arg("entryID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::SetEntryAttribute,
        short: "sea",
        args: &[
            arg("entryID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
            arg("value", ArgKind::Value, true),
        ],
    },
    CommandSpec {
        kind: CommandKind::DeleteEntryAttribute,
        short: "dea",
        args: &[
            arg("entryID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::SetEntryMeta,
        short: "sem",
        args: &[
            arg("entryID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
            arg("value", ArgKind::Value, true),
        ],
    },
    CommandSpec {
        kind: CommandKind::DeleteEntryMeta,
        short: "dem",
        args: &[
            arg("entryID", ArgKind::Id, false),
            arg("key", ArgKind::Key, false),
        ],
    },
    CommandSpec {
        kind: CommandKind::SetVaultAttribute,
        short: "saa",
        args: &[
            arg("key", ArgKind::Key, false),
            arg("value", ArgKind::Value, true),
        ],
    },
    CommandSpec {
        kind: CommandKind::DeleteVaultAttribute,
        short: "daa",
        args: &[arg("key", ArgKind::Key, false)],
    },
    CommandSpec {
        kind: CommandKind::Pad,
        short: "pad",
        args: &[arg("token", ArgKind::Token, false)],
    },
];

impl CommandKind {
    /// Every command kind, in manifest order.
    pub const ALL: [CommandKind; 21] = [
        CommandKind::SetVaultId,
        CommandKind::Comment,
        CommandKind::Format,
        CommandKind::CreateGroup,
        CommandKind::DeleteGroup,
        CommandKind::MoveGroup,
        CommandKind::SetGroupTitle,
        CommandKind::SetGroupAttribute,
        CommandKind::DeleteGroupAttribute,
        CommandKind::CreateEntry,
        CommandKind::DeleteEntry,
        CommandKind::MoveEntry,
        CommandKind::SetEntryProperty,
        CommandKind::DeleteEntryProperty,
        CommandKind::SetEntryAttribute,
        CommandKind::DeleteEntryAttribute,
        CommandKind::SetEntryMeta,
        CommandKind::DeleteEntryMeta,
        CommandKind::SetVaultAttribute,
        CommandKind::DeleteVaultAttribute,
        CommandKind::Pad,
    ];

    /// The manifest row for this command.
    pub fn spec(self) -> &'static CommandSpec {
        &SPECS[self as usize]
    }

    /// Three-letter wire key.
    pub fn short(self) -> &'static str {
        self.spec().short
    }

    /// Resolve a wire key to its command kind.
    pub fn from_short(key: &str) -> Option<Self> {
        match key {
            "aid" => Some(Self::SetVaultId),
            "cmm" => Some(Self::Comment),
            "fmt" => Some(Self::Format),
            "cgr" => Some(Self::CreateGroup),
            "dgr" => Some(Self::DeleteGroup),
            "mgr" => Some(Self::MoveGroup),
            "tgr" => Some(Self::SetGroupTitle),
            "sga" => Some(Self::SetGroupAttribute),
            "dga" => Some(Self::DeleteGroupAttribute),
            "cen" => Some(Self::CreateEntry),
            "den" => Some(Self::DeleteEntry),
            "men" => Some(Self::MoveEntry),
            "sep" => Some(Self::SetEntryProperty),
            "dep" => Some(Self::DeleteEntryProperty),
            "sea" => Some(Self::SetEntryAttribute),
            "dea" => Some(Self::DeleteEntryAttribute),
            "sem" => Some(Self::SetEntryMeta),
            "dem" => Some(Self::DeleteEntryMeta),
            "saa" => Some(Self::SetVaultAttribute),
            "daa" => Some(Self::DeleteVaultAttribute),
            "pad" => Some(Self::Pad),
            _ => None,
        }
    }

    /// Whether replaying this command removes a group, entry, attribute,
    /// or property. Destructive commands are stripped before merge.
    pub fn is_destructive(self) -> bool {
        matches!(
            self,
            Self::DeleteGroup
                | Self::DeleteEntry
                | Self::DeleteGroupAttribute
                | Self::DeleteEntryProperty
                | Self::DeleteEntryAttribute
                | Self::DeleteEntryMeta
                | Self::DeleteVaultAttribute
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_table_aligned_with_kinds() {
        for kind in CommandKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_short_keys_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_short(kind.short()), Some(kind));
        }
    }

    #[test]
    fn test_short_keys_are_three_lowercase_letters() {
        for kind in CommandKind::ALL {
            let short = kind.short();
            assert_eq!(short.len(), 3);
            assert!(short.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(CommandKind::from_short("zzz"), None);
        assert_eq!(CommandKind::from_short("AID"), None);
        assert_eq!(CommandKind::from_short(""), None);
    }

    #[test]
    fn test_arities() {
        let expected = [
            (CommandKind::SetVaultId, 1),
            (CommandKind::Comment, 1),
            (CommandKind::Format, 1),
            (CommandKind::CreateGroup, 2),
            (CommandKind::DeleteGroup, 1),
            (CommandKind::MoveGroup, 2),
            (CommandKind::SetGroupTitle, 2),
            (CommandKind::SetGroupAttribute, 3),
            (CommandKind::DeleteGroupAttribute, 2),
            (CommandKind::CreateEntry, 2),
            (CommandKind::DeleteEntry, 1),
            (CommandKind::MoveEntry, 2),
            (CommandKind::SetEntryProperty, 3),
            (CommandKind::DeleteEntryProperty, 2),
            (CommandKind::SetEntryAttribute, 3),
            (CommandKind::DeleteEntryAttribute, 2),
            (CommandKind::SetEntryMeta, 3),
            (CommandKind::DeleteEntryMeta, 2),
            (CommandKind::SetVaultAttribute, 2),
            (CommandKind::DeleteVaultAttribute, 1),
            (CommandKind::Pad, 1),
        ];
        for (kind, arity) in expected {
            assert_eq!(kind.spec().args.len(), arity, "{}", kind.short());
        }
    }

    #[test]
    fn test_destructive_classification() {
        let destructive: Vec<&str> = CommandKind::ALL
            .into_iter()
            .filter(|k| k.is_destructive())
            .map(CommandKind::short)
            .collect();
        assert_eq!(
            destructive,
            ["dgr", "dga", "den", "dep", "dea", "dem", "daa"]
        );
    }

    #[test]
    fn test_encoded_flags_cover_string_values() {
        for kind in [
            CommandKind::SetGroupTitle,
            CommandKind::SetGroupAttribute,
            CommandKind::SetEntryProperty,
            CommandKind::SetEntryAttribute,
            CommandKind::SetEntryMeta,
            CommandKind::SetVaultAttribute,
        ] {
            let last = kind.spec().args.last().unwrap();
            assert!(last.encoded, "{} value must be encoded", kind.short());
        }
        assert!(!CommandKind::Pad.spec().args[0].encoded);
        assert!(!CommandKind::CreateGroup.spec().args[0].encoded);
    }
}
