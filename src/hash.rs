//! Hashing helpers: SHAKE256 for deriving generator keys from integer seeds,
//! Blake2b-512 for key fingerprints.

use blake2::{Blake2b512, Digest};
use sha3::{Shake256, digest::{Update, ExtendableOutput, XofReader}};

const GENERATOR_DOMAIN: &[u8] = b"cryptopuf/challenge-generator";

/// Length of the hex fingerprint returned by [`key_fingerprint`].
pub const FINGERPRINT_HEX_LEN: usize = 16;

/// Derives an AES-128 key and CTR initial block from a generator seed
/// using SHAKE256 XOF.
pub fn shake256_derive_generator_key(seed: u64) -> ([u8; 16], [u8; 16]) {
    let mut hasher = Shake256::default();
    hasher.update(GENERATOR_DOMAIN);
    hasher.update(&seed.to_le_bytes());
    let mut reader = hasher.finalize_xof();

    let mut key = [0u8; 16];
    reader.read(&mut key);
    let mut iv = [0u8; 16];
    reader.read(&mut iv);
    (key, iv)
}

/// Short Blake2b-512 fingerprint of key material, safe to log.
pub fn key_fingerprint(key: &[u8]) -> String {
    let mut hasher = Blake2b512::new();
    Digest::update(&mut hasher, key);
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_HEX_LEN / 2])
}
