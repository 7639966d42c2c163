// SPDX-License-Identifier: MIT OR Apache-2.0
//! Default text compression: zstd.

use crate::env::TextCompression;
use crate::error::{EnvelopeError, Result};

/// zstd level used for history payloads. Histories are short repetitive
/// text; level 3 compresses them well without noticeable cost.
const COMPRESSION_LEVEL: i32 = 3;

/// zstd-backed text compressor.
#[derive(Debug, Clone)]
pub struct ZstdTextCompression {
    level: i32,
}

impl Default for ZstdTextCompression {
    fn default() -> Self {
        Self {
            level: COMPRESSION_LEVEL,
        }
    }
}

impl ZstdTextCompression {
    /// Compressor with an explicit zstd level.
    pub fn with_level(level: i32) -> Self {
        Self { level }
    }
}

impl TextCompression for ZstdTextCompression {
    fn compress_text(&self, text: &str) -> Result<Vec<u8>> {
        zstd::encode_all(text.as_bytes(), self.level)
            .map_err(|e| EnvelopeError::CompressionFailed(e.to_string()))
    }

    fn decompress_text(&self, data: &[u8]) -> Result<String> {
        let bytes = zstd::decode_all(data)
            .map_err(|e| EnvelopeError::DecompressionFailed(e.to_string()))?;
        String::from_utf8(bytes)
            .map_err(|e| EnvelopeError::DecompressionFailed(format!("invalid UTF-8: {e}")))
    }
}
