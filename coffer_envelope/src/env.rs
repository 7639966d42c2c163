// SPDX-License-Identifier: MIT OR Apache-2.0
//! Explicit injection context for the envelope primitives.
//!
//! The codec never reaches for process-wide state: callers hand it a
//! [`FormatEnv`] carrying the compression and crypto primitives.
//! [`FormatEnv::standard`] assembles the defaults (zstd + Argon2id/
//! AES-256-GCM). Tests and alternative ecosystems inject their own.
//!
//! The v1 property names of the wider ecosystem are published in
//! [`properties`]; each maps 1:1 onto a trait method here.

use std::sync::Arc;

use crate::cipher::GcmTextCrypto;
use crate::compress::ZstdTextCompression;
use crate::error::Result;
use crate::key::KdfConfig;

/// Ecosystem property names, fixed for compatibility.
pub mod properties {
    /// Text compression, forward direction.
    pub const COMPRESS_TEXT: &str = "compression/v1/compressText";
    /// Text compression, reverse direction.
    pub const DECOMPRESS_TEXT: &str = "compression/v1/decompressText";
    /// Symmetric text encryption.
    pub const ENCRYPT_TEXT: &str = "crypto/v1/encryptText";
    /// Symmetric text decryption.
    pub const DECRYPT_TEXT: &str = "crypto/v1/decryptText";

    /// Every property an envelope environment provides.
    pub const ALL: [&str; 4] = [COMPRESS_TEXT, DECOMPRESS_TEXT, ENCRYPT_TEXT, DECRYPT_TEXT];
}

/// Text compression primitive (`compression/v1/*`).
pub trait TextCompression: Send + Sync {
    /// Compress UTF-8 text into an opaque byte payload.
    fn compress_text(&self, text: &str) -> Result<Vec<u8>>;
    /// Reverse [`TextCompression::compress_text`].
    fn decompress_text(&self, data: &[u8]) -> Result<String>;
}

/// Symmetric text crypto primitive (`crypto/v1/*`).
pub trait TextCrypto: Send + Sync {
    /// Encrypt a payload under a password; returns armored text.
    fn encrypt_text(&self, payload: &[u8], password: &str) -> Result<String>;
    /// Reverse [`TextCrypto::encrypt_text`].
    fn decrypt_text(&self, armored: &str, password: &str) -> Result<Vec<u8>>;
}

/// The primitives an envelope codec operates with.
#[derive(Clone)]
pub struct FormatEnv {
    compression: Arc<dyn TextCompression>,
    crypto: Arc<dyn TextCrypto>,
}

impl FormatEnv {
    /// Environment from explicit primitives.
    pub fn new(compression: Arc<dyn TextCompression>, crypto: Arc<dyn TextCrypto>) -> Self {
        Self {
            compression,
            crypto,
        }
    }

    /// The default environment: zstd compression and Argon2id-derived
    /// AES-256-GCM.
    pub fn standard() -> Self {
        Self::new(
            Arc::new(ZstdTextCompression::default()),
            Arc::new(GcmTextCrypto::default()),
        )
    }

    /// Default environment with explicit KDF parameters. Tests use
    /// cheap parameters; production callers keep the defaults.
    pub fn with_kdf(kdf: KdfConfig) -> Self {
        Self::new(
            Arc::new(ZstdTextCompression::default()),
            Arc::new(GcmTextCrypto::new(kdf)),
        )
    }

    /// The compression primitive.
    pub fn compression(&self) -> &dyn TextCompression {
        self.compression.as_ref()
    }

    /// The crypto primitive.
    pub fn crypto(&self) -> &dyn TextCrypto {
        self.crypto.as_ref()
    }
}

impl Default for FormatEnv {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for FormatEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatEnv")
            .field("properties", &properties::ALL)
            .finish()
    }
}
