// SPDX-License-Identifier: MIT OR Apache-2.0
//! On-disk envelope for coffer vault histories.
//!
//! Persistent form: a fixed ASCII signature followed by the base64 of
//! the compressed, password-encrypted history text. Primitives are
//! injected through [`FormatEnv`]; the defaults are zstd and Argon2id-
//! derived AES-256-GCM. Nothing here is process-global.
//!
//! # Example
//!
//! ```
//! use coffer_envelope::{decode_history, encode_history, Credentials, FormatEnv, KdfConfig};
//!
//! let env = FormatEnv::with_kdf(
//!     KdfConfig::default()
//!         .with_memory_cost(1024)
//!         .with_time_cost(1)
//!         .with_parallelism(1),
//! );
//! let credentials = Credentials::new("correct horse battery staple");
//! let history = vec!["fmt coffer/a".to_string(), "aid v1".to_string()];
//!
//! let encoded = encode_history(&history, &credentials, &env).unwrap();
//! let decoded = decode_history(&encoded, &credentials, &env).unwrap();
//! assert_eq!(decoded, history);
//! ```

pub mod cipher;
pub mod codec;
pub mod compress;
pub mod credentials;
pub mod env;
pub mod error;
pub mod key;

pub use cipher::{GcmTextCrypto, NONCE_SIZE};
pub use codec::{decode_history, encode_history, has_valid_signature, strip_signature, SIGNATURE};
pub use compress::ZstdTextCompression;
pub use credentials::Credentials;
pub use env::{properties, FormatEnv, TextCompression, TextCrypto};
pub use error::{EnvelopeError, Result};
pub use key::{KdfConfig, MasterKey, KEY_SIZE, SALT_SIZE};
