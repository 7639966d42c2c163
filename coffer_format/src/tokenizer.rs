// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command tokenizer: splits one history line into a short key and
//! ordered argument tokens.
//!
//! A valid line is three lowercase ASCII letters, one whitespace
//! character, then at least one more character. Double-quoted runs are
//! captured as single tokens with the surrounding quotes removed, so
//! encoded arguments and legacy quoted literals survive whitespace
//! splitting intact.

use crate::error::{FormatError, Result};

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCommand {
    /// Three-letter short key.
    pub short: String,
    /// Ordered argument tokens, quoted runs unwrapped.
    pub args: Vec<String>,
}

/// Whether a line matches the command shape (`^[a-z]{3}\s.+$`).
pub fn is_valid_command_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 5
        && bytes[..3].iter().all(u8::is_ascii_lowercase)
        && bytes[3].is_ascii_whitespace()
}

/// Tokenize a single command line.
pub fn tokenize(line: &str) -> Result<TokenizedCommand> {
    if !is_valid_command_line(line) {
        return Err(FormatError::InvalidCommand(line.to_string()));
    }
    Ok(TokenizedCommand {
        short: line[..3].to_string(),
        args: split_arguments(&line[4..]),
    })
}

fn split_arguments(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if c == '"' {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '"' {
                    break;
                }
                token.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        args.push(token);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let cmd = tokenize("cgr 0 11111111-1111-1111-1111-111111111111").unwrap();
        assert_eq!(cmd.short, "cgr");
        assert_eq!(cmd.args, vec!["0", "11111111-1111-1111-1111-111111111111"]);
    }

    #[test]
    fn test_tokenize_preserves_quoted_run() {
        let cmd = tokenize("tgr g1 \"b64:TXkgVGl0bGU=\"").unwrap();
        assert_eq!(cmd.args, vec!["g1", "b64:TXkgVGl0bGU="]);
    }

    #[test]
    fn test_tokenize_quoted_run_with_spaces() {
        let cmd = tokenize("tgr g1 \"hello world\"").unwrap();
        assert_eq!(cmd.args, vec!["g1", "hello world"]);
    }

    #[test]
    fn test_tokenize_collapses_repeated_whitespace() {
        let cmd = tokenize("sep  e1   password  secret").unwrap();
        assert_eq!(cmd.args, vec!["e1", "password", "secret"]);
    }

    #[test]
    fn test_rejects_short_key_too_short() {
        assert!(matches!(
            tokenize("cg 0"),
            Err(FormatError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_rejects_uppercase_key() {
        assert!(matches!(
            tokenize("CGR 0 1"),
            Err(FormatError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_rejects_missing_arguments_section() {
        assert!(matches!(tokenize("cgr"), Err(FormatError::InvalidCommand(_))));
        assert!(matches!(
            tokenize("cgr "),
            Err(FormatError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_rejects_digit_key() {
        assert!(matches!(
            tokenize("cg1 x"),
            Err(FormatError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_rejects_empty_line() {
        assert!(matches!(tokenize(""), Err(FormatError::InvalidCommand(_))));
    }

    #[test]
    fn test_whitespace_only_arguments_yield_no_tokens() {
        let cmd = tokenize("pad \t ").unwrap();
        assert!(cmd.args.is_empty());
    }
}
