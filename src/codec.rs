//! Encoding utilities: packing bipolar challenges into bytes for the cipher,
//! unpacking bytes back into challenges, and decoding hex key material.

use crate::error::{ChallengeError, PufError, Result};
use crate::types::{Bipolar, Challenge, ChallengeBytes};

/// Number of bytes needed to hold `challenge_length` packed bits.
pub fn packed_len(challenge_length: usize) -> usize {
    (challenge_length + 7) / 8
}

/// Encodes a bipolar challenge into bytes.
/// Each value maps -1 -> 0 and 1 -> 1; bits are packed most-significant-bit
/// first in input order and the low bits of the final byte are zero-padded.
pub fn encode_challenge(challenge: &[Bipolar]) -> core::result::Result<ChallengeBytes, ChallengeError> {
    let mut bytes = vec![0u8; packed_len(challenge.len())];
    for (position, &value) in challenge.iter().enumerate() {
        let bit = match value {
            -1 => 0u8,
            1 => 1u8,
            _ => return Err(ChallengeError::NotBipolar { position, value }),
        };
        bytes[position / 8] |= bit << (7 - position % 8);
    }
    Ok(ChallengeBytes(bytes))
}

/// Decodes the first `challenge_length` bits of `bytes` (MSB-first) into a
/// bipolar challenge. Padding bits beyond `challenge_length` are ignored.
pub fn decode_challenge(bytes: &[u8], challenge_length: usize) -> core::result::Result<Challenge, ChallengeError> {
    let expected = packed_len(challenge_length);
    if bytes.len() < expected {
        return Err(ChallengeError::WrongLength { expected, found: bytes.len() });
    }
    Ok((0..challenge_length)
        .map(|i| if (bytes[i / 8] >> (7 - i % 8)) & 1 == 1 { 1 } else { -1 })
        .collect())
}

/// Decodes a hex string into exactly `expected_len` bytes.
/// `field` names the parameter in the error ("key", "nonce").
pub fn decode_hex_field(field: &'static str, hex_str: &str, expected_len: usize) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).map_err(|source| PufError::InvalidHex { field, source })?;
    if bytes.len() != expected_len {
        return Err(PufError::InvalidLength { field, expected: expected_len, found: bytes.len() });
    }
    Ok(bytes)
}
