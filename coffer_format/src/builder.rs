// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command builder: the construction dual of the tokenizer.
//!
//! Arguments flagged `encoded` in the manifest are always wrapped in the
//! encoded envelope; literal arguments are emitted verbatim and must be
//! single unquoted tokens. Freeform text arguments may contain
//! whitespace - they re-join on decode.

use crate::codec::encode_argument;
use crate::error::{FormatError, Result};
use crate::manifest::{ArgKind, CommandKind};

/// Build a syntactically valid command line from a kind and arguments.
pub fn build_command<S: AsRef<str>>(kind: CommandKind, args: &[S]) -> Result<String> {
    let spec = kind.spec();
    if args.len() != spec.args.len() {
        return Err(FormatError::InvalidArgument(format!(
            "{} expects {} arguments, got {}",
            spec.short,
            spec.args.len(),
            args.len()
        )));
    }

    let mut line = String::from(spec.short);
    for (value, descriptor) in args.iter().zip(spec.args) {
        let value = value.as_ref();
        line.push(' ');
        if descriptor.encoded {
            line.push_str(&encode_argument(value));
            continue;
        }
        if descriptor.kind == ArgKind::Text {
            if value.is_empty() {
                return Err(FormatError::InvalidArgument(format!(
                    "{} {} must not be empty",
                    spec.short, descriptor.name
                )));
            }
            line.push_str(value);
            continue;
        }
        if value.is_empty()
            || value.starts_with('"')
            || value.chars().any(char::is_whitespace)
        {
            return Err(FormatError::InvalidArgument(format!(
                "{} {} must be a single unquoted token, got {value:?}",
                spec.short, descriptor.name
            )));
        }
        line.push_str(value);
    }
    Ok(line)
}
