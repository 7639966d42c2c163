// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared helpers for the end-to-end tests.

pub mod generators;

use coffer_envelope::{FormatEnv, KdfConfig};

/// Envelope environment with cheap KDF parameters for tests.
pub fn fast_env() -> FormatEnv {
    FormatEnv::with_kdf(
        KdfConfig::default()
            .with_memory_cost(1024)
            .with_time_cost(1)
            .with_parallelism(1),
    )
}
