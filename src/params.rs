//! Defines the supported cipher cores and the fixed response-extraction constants.

use crate::error::{PufError, Result};

/// Responses are always a single bipolar value.
pub const RESPONSE_LENGTH: usize = 1;

/// Bit position (MSB-first across the cipher output) that becomes the response.
pub const RESPONSE_BIT_INDEX: usize = 127;

/// Minimum cipher output length for `RESPONSE_BIT_INDEX` to exist.
pub const MIN_CIPHER_OUTPUT_BYTES: usize = RESPONSE_BIT_INDEX / 8 + 1;

/// Byte sizes of a cipher core's key, nonce and authentication tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherParams {
    pub name: &'static str,
    pub key_bytes: usize,
    pub nonce_bytes: usize,
    pub tag_bytes: usize,
}

/// Closed set of cipher cores a crypto PUF can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherVariant {
    TinyJambu128(CipherParams),
}

impl CipherVariant {
    /// TinyJAMBU-128: 128-bit key, 96-bit nonce, 64-bit tag.
    pub fn tinyjambu128() -> Self {
        CipherVariant::TinyJambu128(CipherParams {
            name: "tinyjambu",
            key_bytes: 16,
            nonce_bytes: 12,
            tag_bytes: 8,
        })
    }

    pub fn params(&self) -> &CipherParams {
        match self {
            CipherVariant::TinyJambu128(p) => p,
        }
    }

    pub fn name(&self) -> &'static str { self.params().name }
    pub fn key_bytes(&self) -> usize { self.params().key_bytes }
    pub fn nonce_bytes(&self) -> usize { self.params().nonce_bytes }
    pub fn tag_bytes(&self) -> usize { self.params().tag_bytes }

    /// Smallest challenge length whose ciphertext is long enough to carry
    /// the response bit. Shorter challenges fail extraction.
    pub fn min_challenge_length(&self) -> usize {
        let body_bytes = MIN_CIPHER_OUTPUT_BYTES.saturating_sub(self.tag_bytes());
        if body_bytes == 0 {
            1
        } else {
            (body_bytes - 1) * 8 + 1
        }
    }

    pub fn from_name(name: &str) -> Result<CipherVariant> {
        match name.to_lowercase().as_str() {
            "tinyjambu" | "tinyjambu128" | "tinyjambu-128" => Ok(CipherVariant::tinyjambu128()),
            _ => Err(PufError::UnsupportedVariant(name.to_string())),
        }
    }
}

impl Default for CipherVariant {
    fn default() -> Self {
        CipherVariant::tinyjambu128()
    }
}
