// SPDX-License-Identifier: MIT OR Apache-2.0
//! Argument codec: transport-safe encoding for values that may contain
//! whitespace or quotes.
//!
//! The wire form of an encoded argument is `"b64:<base64>"` - double
//! quotes, a marker prefix, and the STANDARD base64 of the UTF-8 value.
//! The tokenizer captures quoted runs without their surrounding quotes,
//! so decoding operates on bare `b64:` tokens. Decode policy: a token
//! matching the marker decodes; anything else passes through unchanged,
//! which lets legacy unencoded values replay without corruption.

use base64::Engine;

use crate::error::{FormatError, Result};
use crate::manifest::{ArgKind, CommandKind};

/// Marker prefix of an encoded argument token.
pub const ENCODED_PREFIX: &str = "b64:";

/// Encode a value into its quoted wire form.
pub fn encode_argument(value: &str) -> String {
    let body = base64::engine::general_purpose::STANDARD.encode(value.as_bytes());
    format!("\"{ENCODED_PREFIX}{body}\"")
}

/// Whether a tokenized argument carries the encoded marker.
pub fn is_encoded(token: &str) -> bool {
    token.starts_with(ENCODED_PREFIX)
}

/// Decode a tokenized argument.
///
/// Tokens without the marker pass through unchanged.
pub fn decode_argument(token: &str) -> Result<String> {
    if !is_encoded(token) {
        return Ok(token.to_string());
    }
    let body = &token[ENCODED_PREFIX.len()..];
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(body)
        .map_err(|e| FormatError::InvalidArgument(format!("malformed encoded argument: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| FormatError::InvalidArgument(format!("encoded argument is not UTF-8: {e}")))
}

/// Decode a command's tokenized arguments against its manifest row.
///
/// When the line carries more tokens than the manifest declares and the
/// final argument is freeform text or an encoded string, the surplus
/// tokens re-join into that final argument. Legacy lines with unencoded
/// spaced values (`tgr <id> My Title`) replay intact this way.
pub fn decode_arguments(kind: CommandKind, tokens: &[String]) -> Result<Vec<String>> {
    let declared = kind.spec().args.len();

    if tokens.len() > declared && joins_surplus(kind) {
        let mut decoded: Vec<String> = tokens[..declared - 1]
            .iter()
            .map(|t| decode_argument(t))
            .collect::<Result<_>>()?;
        // Single-space join; the original separator widths are not
        // recoverable from tokens.
        let tail = tokens[declared - 1..].join(" ");
        decoded.push(decode_argument(&tail)?);
        return Ok(decoded);
    }

    tokens.iter().map(|t| decode_argument(t)).collect()
}

fn joins_surplus(kind: CommandKind) -> bool {
    match kind.spec().args.last() {
        Some(last) => last.encoded || last.kind == ArgKind::Text,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_produces_quoted_marker() {
        let encoded = encode_argument("hello");
        assert!(encoded.starts_with("\"b64:"));
        assert!(encoded.ends_with('"'));
    }

    #[test]
    fn test_round_trip_plain() {
        let encoded = encode_argument("secret");
        let token = encoded.trim_matches('"');
        assert_eq!(decode_argument(token).unwrap(), "secret");
    }

    #[test]
    fn test_round_trip_whitespace_and_quotes() {
        let value = "pass \"word\" with\ttabs and spaces";
        let encoded = encode_argument(value);
        let token = &encoded[1..encoded.len() - 1];
        assert_eq!(decode_argument(token).unwrap(), value);
    }

    #[test]
    fn test_round_trip_unicode() {
        let value = "p\u{e4}ssw\u{f6}rd \u{1f511}";
        let encoded = encode_argument(value);
        let token = &encoded[1..encoded.len() - 1];
        assert_eq!(decode_argument(token).unwrap(), value);
    }

    #[test]
    fn test_round_trip_empty() {
        let encoded = encode_argument("");
        let token = &encoded[1..encoded.len() - 1];
        assert_eq!(decode_argument(token).unwrap(), "");
    }

    #[test]
    fn test_unencoded_token_passes_through() {
        assert_eq!(decode_argument("0").unwrap(), "0");
        assert_eq!(decode_argument("my-title").unwrap(), "my-title");
        assert_eq!(decode_argument("note").unwrap(), "note");
    }

    #[test]
    fn test_malformed_interior_rejected() {
        let err = decode_argument("b64:!!not-base64!!").unwrap_err();
        assert!(matches!(err, FormatError::InvalidArgument(_)));
    }

    #[test]
    fn test_surplus_tokens_join_into_encoded_tail() {
        let tokens: Vec<String> = ["g1", "My", "Legacy", "Title"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let decoded = decode_arguments(CommandKind::SetGroupTitle, &tokens).unwrap();
        assert_eq!(decoded, vec!["g1", "My Legacy Title"]);
    }

    #[test]
    fn test_surplus_tokens_join_for_comment() {
        let tokens: Vec<String> = ["hello", "vault", "world"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let decoded = decode_arguments(CommandKind::Comment, &tokens).unwrap();
        assert_eq!(decoded, vec!["hello vault world"]);
    }

    #[test]
    fn test_surplus_tokens_not_joined_for_ids() {
        let tokens: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let decoded = decode_arguments(CommandKind::CreateGroup, &tokens).unwrap();
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn test_exact_tokens_decode_in_place() {
        let tokens: Vec<String> = vec!["e1".into(), "password".into(), encode_body("hunter2")];
        let decoded = decode_arguments(CommandKind::SetEntryProperty, &tokens).unwrap();
        assert_eq!(decoded, vec!["e1", "password", "hunter2"]);
    }

    fn encode_body(value: &str) -> String {
        let quoted = encode_argument(value);
        quoted[1..quoted.len() - 1].to_string()
    }
}
