// SPDX-License-Identifier: MIT OR Apache-2.0
//! Default symmetric text cipher: AES-256-GCM over a password-derived
//! key.
//!
//! Armored wire form is STANDARD base64 of `salt(16) || nonce(12) ||
//! ciphertext`. The salt feeds Argon2id on decrypt, so the armored text
//! is self-contained given the password.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::env::TextCrypto;
use crate::error::{EnvelopeError, Result};
use crate::key::{KdfConfig, MasterKey, SALT_SIZE};

/// 12-byte nonce for AES-GCM (96 bits is the standard).
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag length.
const TAG_SIZE: usize = 16;

/// Password-based AES-256-GCM text cipher.
#[derive(Debug, Clone, Default)]
pub struct GcmTextCrypto {
    kdf: KdfConfig,
}

impl GcmTextCrypto {
    /// Cipher with explicit KDF parameters.
    pub fn new(kdf: KdfConfig) -> Self {
        Self { kdf }
    }
}

impl TextCrypto for GcmTextCrypto {
    fn encrypt_text(&self, payload: &[u8], password: &str) -> Result<String> {
        let (key, salt) = MasterKey::derive_with_random_salt(password.as_bytes(), &self.kdf)?;
        let enc_key = Zeroizing::new(key.encryption_key());
        let cipher = Aes256Gcm::new_from_slice(enc_key.as_ref())
            .map_err(|e| EnvelopeError::EncryptionFailed(format!("invalid key: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, payload)
            .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;

        let mut framed = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
        framed.extend_from_slice(&salt);
        framed.extend_from_slice(&nonce_bytes);
        framed.extend(ciphertext);
        Ok(base64::engine::general_purpose::STANDARD.encode(&framed))
    }

    fn decrypt_text(&self, armored: &str, password: &str) -> Result<Vec<u8>> {
        let framed = base64::engine::general_purpose::STANDARD
            .decode(armored)
            .map_err(|e| EnvelopeError::DecryptionFailed(format!("invalid base64: {e}")))?;
        if framed.len() < SALT_SIZE + NONCE_SIZE + TAG_SIZE {
            return Err(EnvelopeError::DecryptionFailed(format!(
                "ciphertext too short: {} bytes",
                framed.len()
            )));
        }

        let (salt, rest) = framed.split_at(SALT_SIZE);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

        let key = MasterKey::derive_with_salt(password.as_bytes(), salt, &self.kdf)?;
        let enc_key = Zeroizing::new(key.encryption_key());
        let cipher = Aes256Gcm::new_from_slice(enc_key.as_ref())
            .map_err(|e| EnvelopeError::DecryptionFailed(format!("invalid key: {e}")))?;

        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| EnvelopeError::DecryptionFailed("authentication failed".to_string()))
    }
}
