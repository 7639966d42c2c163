// SPDX-License-Identifier: MIT OR Apache-2.0
//! Envelope codec: the signed, compressed, encrypted framing around a
//! history on disk.
//!
//! On-disk form is `<signature><base64-ciphertext>`. The signature is a
//! fixed ASCII tag naming the envelope dialect, so foreign or legacy
//! content is rejected before any crypto runs.
//!
//! Encode: join lines with `\n`, compress, encrypt, prepend signature.
//! Decode: verify and strip signature, decrypt, decompress, split.

use crate::credentials::Credentials;
use crate::env::FormatEnv;
use crate::error::{EnvelopeError, Result};

/// ASCII signature prefixed to every encoded vault.
pub const SIGNATURE: &str = "c~>coffer/a";

/// Whether on-disk content carries the expected signature.
pub fn has_valid_signature(text: &str) -> bool {
    text.starts_with(SIGNATURE)
}

/// Strip the signature, rejecting foreign content.
pub fn strip_signature(text: &str) -> Result<&str> {
    text.strip_prefix(SIGNATURE)
        .ok_or(EnvelopeError::InvalidSignature)
}

/// Encode a history into its on-disk envelope.
pub fn encode_history<S: AsRef<str>>(
    history: &[S],
    credentials: &Credentials,
    env: &FormatEnv,
) -> Result<String> {
    let joined = history
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    let compressed = env.compression().compress_text(&joined)?;
    let armored = env
        .crypto()
        .encrypt_text(&compressed, credentials.master_password())?;
    tracing::debug!(
        lines = history.len(),
        armored_len = armored.len(),
        "encoded history envelope"
    );
    Ok(format!("{SIGNATURE}{armored}"))
}

/// Decode an on-disk envelope back into history lines.
pub fn decode_history(
    text: &str,
    credentials: &Credentials,
    env: &FormatEnv,
) -> Result<Vec<String>> {
    let armored = strip_signature(text)?;
    let payload = env
        .crypto()
        .decrypt_text(armored, credentials.master_password())?;
    if payload.is_empty() {
        return Err(EnvelopeError::DecryptionFailed(
            "empty payload after decrypt".to_string(),
        ));
    }
    let joined = env.compression().decompress_text(&payload)?;
    if joined.is_empty() {
        return Ok(Vec::new());
    }
    let lines: Vec<String> = joined.split('\n').map(str::to_string).collect();
    tracing::debug!(lines = lines.len(), "decoded history envelope");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KdfConfig;

    fn fast_env() -> FormatEnv {
        FormatEnv::with_kdf(
            KdfConfig::default()
                .with_memory_cost(1024)
                .with_time_cost(1)
                .with_parallelism(1),
        )
    }

    fn sample_history() -> Vec<String> {
        vec![
            "fmt coffer/a".to_string(),
            "aid 22222222-2222-2222-2222-222222222222".to_string(),
            "cgr 0 g1".to_string(),
            "sep e1 password \"b64:aHVudGVyMg==\"".to_string(),
        ]
    }

    #[test]
    fn test_signature_checks() {
        assert!(has_valid_signature("c~>coffer/aAAAA"));
        assert!(!has_valid_signature("b~>elsewhere/aAAAA"));
        assert!(!has_valid_signature(""));
        assert!(strip_signature("garbage").is_err());
        assert_eq!(strip_signature("c~>coffer/aXYZ").unwrap(), "XYZ");
    }

    #[test]
    fn test_round_trip() {
        let env = fast_env();
        let credentials = Credentials::new("master password");
        let history = sample_history();

        let encoded = encode_history(&history, &credentials, &env).unwrap();
        assert!(has_valid_signature(&encoded));

        let decoded = decode_history(&encoded, &credentials, &env).unwrap();
        assert_eq!(decoded, history);
    }

    #[test]
    fn test_round_trip_empty_history() {
        let env = fast_env();
        let credentials = Credentials::new("pw");
        let encoded = encode_history::<String>(&[], &credentials, &env).unwrap();
        let decoded = decode_history(&encoded, &credentials, &env).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_wrong_password_fails() {
        let env = fast_env();
        let history = sample_history();
        let encoded = encode_history(&history, &Credentials::new("right"), &env).unwrap();
        assert!(matches!(
            decode_history(&encoded, &Credentials::new("wrong"), &env),
            Err(EnvelopeError::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_foreign_content_rejected_before_crypto() {
        let env = fast_env();
        assert!(matches!(
            decode_history("legacy vault data", &Credentials::new("pw"), &env),
            Err(EnvelopeError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_envelope_fails() {
        let env = fast_env();
        let credentials = Credentials::new("pw");
        let mut encoded = encode_history(&sample_history(), &credentials, &env).unwrap();
        encoded.truncate(encoded.len() - 4);
        assert!(matches!(
            decode_history(&encoded, &credentials, &env),
            Err(EnvelopeError::DecryptionFailed(_))
        ));
    }
}
