//! AES-128-CTR based random challenge generation.
//!
//! Each generator owns its keystream, so seeding one never affects another
//! and nothing here touches the response path.

use aes::Aes128;
use aes::cipher::{generic_array::GenericArray, StreamCipher, KeyIvInit};
use ctr::Ctr128BE;
use getrandom::getrandom;

use crate::codec::packed_len;
use crate::error::{PufError, Result};
use crate::hash::shake256_derive_generator_key;
use crate::types::Challenge;

/// Produces uniformly random bipolar challenges.
pub struct ChallengeGenerator {
    keystream: Ctr128BE<Aes128>,
}

impl ChallengeGenerator {
    /// Reproducible generator: the AES key and initial counter block are
    /// derived from `seed` with SHAKE256.
    pub fn from_seed(seed: u64) -> Self {
        let (key, iv) = shake256_derive_generator_key(seed);
        Self::from_key_iv(&key, &iv)
    }

    /// Generator keyed from the OS entropy source.
    pub fn from_entropy() -> Result<Self> {
        let mut material = [0u8; 32];
        getrandom(&mut material).map_err(PufError::Entropy)?;
        Ok(Self::from_key_iv(&material[..16], &material[16..]))
    }

    fn from_key_iv(key: &[u8], iv: &[u8]) -> Self {
        let key = GenericArray::from_slice(key);
        let iv = GenericArray::from_slice(iv);
        ChallengeGenerator { keystream: Ctr128BE::<Aes128>::new(key, iv) }
    }

    /// Next `challenge_length`-element challenge. Each value is one keystream
    /// bit, unpacked MSB-first; unused bits of the last byte are discarded.
    pub fn next_challenge(&mut self, challenge_length: usize) -> Challenge {
        let mut bytes = vec![0u8; packed_len(challenge_length)];
        self.keystream.apply_keystream(&mut bytes);
        (0..challenge_length)
            .map(|i| if (bytes[i / 8] >> (7 - i % 8)) & 1 == 1 { 1 } else { -1 })
            .collect()
    }

    pub fn challenges(&mut self, count: usize, challenge_length: usize) -> Vec<Challenge> {
        (0..count).map(|_| self.next_challenge(challenge_length)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generators_agree() {
        let a = ChallengeGenerator::from_seed(1).challenges(5, 64);
        let b = ChallengeGenerator::from_seed(1).challenges(5, 64);
        assert_eq!(a, b);
        assert_ne!(a, ChallengeGenerator::from_seed(2).challenges(5, 64));
    }

    #[test]
    fn test_shape_and_values() {
        let mut gen = ChallengeGenerator::from_seed(99);
        for len in [1usize, 7, 8, 65, 128] {
            let c = gen.next_challenge(len);
            assert_eq!(c.len(), len);
            assert!(c.iter().all(|&v| v == 1 || v == -1));
        }
    }

    #[test]
    fn test_seed_zero_vector() {
        // keystream starts 0x01 0x10
        let c = ChallengeGenerator::from_seed(0).next_challenge(16);
        assert_eq!(c, vec![-1, -1, -1, -1, -1, -1, -1, 1, -1, -1, -1, 1, -1, -1, -1, -1]);
    }

    #[test]
    fn test_partial_byte_lengths_keep_prefix() {
        // lengths not a multiple of 8 still return exactly that many bits,
        // the leading bits of the same keystream byte
        let seven = ChallengeGenerator::from_seed(0).next_challenge(7);
        assert_eq!(seven, vec![-1; 7]);
        let nine = ChallengeGenerator::from_seed(0).next_challenge(9);
        assert_eq!(nine, vec![-1, -1, -1, -1, -1, -1, -1, 1, -1]);
        assert!(ChallengeGenerator::from_seed(0).next_challenge(0).is_empty());
    }

    #[test]
    fn test_stream_advances() {
        let mut gen = ChallengeGenerator::from_seed(5);
        let first = gen.next_challenge(128);
        let second = gen.next_challenge(128);
        assert_ne!(first, second);
    }

    #[test]
    fn test_values_are_mixed() {
        let challenges = ChallengeGenerator::from_seed(0).challenges(16, 64);
        let ones = challenges.iter().flatten().filter(|&&v| v == 1).count();
        // 1024 fair bits; a count outside [384, 640] is beyond 8 sigma.
        assert!(ones > 384 && ones < 640, "ones = {}", ones);
    }

    #[test]
    fn test_entropy_generator() {
        let mut gen = ChallengeGenerator::from_entropy().unwrap();
        assert_eq!(gen.next_challenge(64).len(), 64);
    }
}
