// SPDX-License-Identifier: MIT OR Apache-2.0
//! Share-prefix grammar: `$<share-id> <command>`.
//!
//! A share-scoped line carries the command of an externally-injected
//! share. The prefix is stripped before dispatch; the ID travels to the
//! executor as an option. IDs are UUID-shaped but tolerantly checked
//! (legacy histories carry uppercase and non-hex IDs), so the check is
//! length 36, hyphens at 8/13/18/23, alphanumeric elsewhere.

/// Byte length of a share ID.
pub const SHARE_ID_LEN: usize = 36;

const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Whether a token has the accepted share-ID shape.
pub fn is_share_id(token: &str) -> bool {
    if token.len() != SHARE_ID_LEN {
        return false;
    }
    token.bytes().enumerate().all(|(i, b)| {
        if HYPHENS.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_alphanumeric()
        }
    })
}

/// Split a history line into its optional share ID and the bare command.
pub fn split_share_prefix(line: &str) -> (Option<&str>, &str) {
    if let Some(rest) = line.strip_prefix('$') {
        if rest.len() > SHARE_ID_LEN + 1
            && rest.is_char_boundary(SHARE_ID_LEN)
            && is_share_id(&rest[..SHARE_ID_LEN])
            && rest.as_bytes()[SHARE_ID_LEN] == b' '
        {
            return (Some(&rest[..SHARE_ID_LEN]), &rest[SHARE_ID_LEN + 1..]);
        }
    }
    (None, line)
}

/// Prefix a command with a share ID.
pub fn prefix_share_line(share_id: &str, command: &str) -> String {
    format!("${share_id} {command}")
}
