// SPDX-License-Identifier: MIT OR Apache-2.0
//! Master key derivation using Argon2id with HKDF-based subkey
//! separation.

use argon2::{Algorithm, Argon2, Params, Version};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{EnvelopeError, Result};

/// Salt size for Argon2id key derivation.
pub const SALT_SIZE: usize = 16;

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Argon2id parameters for password-based derivation.
#[derive(Debug, Clone)]
pub struct KdfConfig {
    /// Memory cost in KiB (default: 65536 = 64MB).
    pub memory_cost: u32,
    /// Iteration count (default: 3).
    pub time_cost: u32,
    /// Lane count (default: 4).
    pub parallelism: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KdfConfig {
    /// Override the memory cost.
    #[must_use]
    pub fn with_memory_cost(mut self, kib: u32) -> Self {
        self.memory_cost = kib;
        self
    }

    /// Override the iteration count.
    #[must_use]
    pub fn with_time_cost(mut self, iterations: u32) -> Self {
        self.time_cost = iterations;
        self
    }

    /// Override the lane count.
    #[must_use]
    pub fn with_parallelism(mut self, lanes: u32) -> Self {
        self.parallelism = lanes;
        self
    }
}

/// Derived master key (zeroized on drop).
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_SIZE],
}

impl MasterKey {
    /// Derive a master key with a specific salt.
    pub fn derive_with_salt(input: &[u8], salt: &[u8], config: &KdfConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(KEY_SIZE),
        )
        .map_err(|e| EnvelopeError::KeyDerivation(format!("invalid Argon2 params: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = [0u8; KEY_SIZE];
        argon2
            .hash_password_into(input, salt, &mut key)
            .map_err(|e| EnvelopeError::KeyDerivation(format!("Argon2 failed: {e}")))?;

        Ok(Self { bytes: key })
    }

    /// Derive a master key with a newly generated random salt.
    /// Returns both the key and the salt for embedding in the envelope.
    pub fn derive_with_random_salt(
        input: &[u8],
        config: &KdfConfig,
    ) -> Result<(Self, [u8; SALT_SIZE])> {
        let mut salt = [0u8; SALT_SIZE];
        rand::thread_rng().fill_bytes(&mut salt);
        let key = Self::derive_with_salt(input, &salt, config)?;
        Ok((key, salt))
    }

    /// Derive a subkey using HKDF with domain separation.
    #[allow(clippy::missing_panics_doc)] // HKDF expand never fails for 32-byte output
    pub fn derive_subkey(&self, domain: &[u8]) -> [u8; KEY_SIZE] {
        let hk = Hkdf::<Sha256>::new(None, &self.bytes);
        let mut output = [0u8; KEY_SIZE];
        hk.expand(domain, &mut output)
            .expect("HKDF expand should never fail with 32-byte output");
        output
    }

    /// Derive the AES-256-GCM encryption key for history payloads.
    pub fn encryption_key(&self) -> [u8; KEY_SIZE] {
        self.derive_subkey(b"coffer_envelope_encryption_v1")
    }
}
