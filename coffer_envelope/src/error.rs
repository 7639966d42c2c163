// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for envelope encoding and decoding.

use thiserror::Error;

/// Result type for envelope operations.
pub type Result<T> = std::result::Result<T, EnvelopeError>;

/// Errors raised by the envelope codec and its primitives.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Content does not carry the expected signature prefix.
    #[error("invalid signature")]
    InvalidSignature,

    /// Decryption failed or produced an empty payload.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Decompression failed or produced invalid text.
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Compression failed.
    #[error("compression failed: {0}")]
    CompressionFailed(String),

    /// Master key derivation failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
}
