//! TinyJAMBU-128 authenticated encryption.
//!
//! The 128-bit state is held as four little-endian 32-bit words
//! `state[3] || state[2] || state[1] || state[0]`. Every step of the keyed
//! NLFSR permutation is applied 32 at a time. Key: 16 bytes, nonce: 12 bytes,
//! tag: 8 bytes appended to the ciphertext.

use crate::error::{PufError, Result};

pub const KEY_BYTES: usize = 16;
pub const NONCE_BYTES: usize = 12;
pub const TAG_BYTES: usize = 8;

const FRAME_BITS_IV: u32 = 0x10;
const FRAME_BITS_AD: u32 = 0x30;
const FRAME_BITS_PC: u32 = 0x50;
const FRAME_BITS_FINALIZATION: u32 = 0x70;

const NROUND1: usize = 128 * 5;
const NROUND2: usize = 128 * 10;

type State = [u32; 4];
type KeyWords = [u32; 4];

fn le_word(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(word)
}

fn state_update(state: &mut State, key: &KeyWords, number_of_steps: usize) {
    for i in 0..(number_of_steps >> 5) {
        let t1 = (state[1] >> 15) | (state[2] << 17);
        let t2 = (state[2] >> 6) | (state[3] << 26);
        let t3 = (state[2] >> 21) | (state[3] << 11);
        let t4 = (state[2] >> 27) | (state[3] << 5);
        let feedback = state[0] ^ t1 ^ !(t2 & t3) ^ t4 ^ key[i & 3];
        state[0] = state[1];
        state[1] = state[2];
        state[2] = state[3];
        state[3] = feedback;
    }
}

fn initialization(key: &KeyWords, nonce: &[u8]) -> State {
    let mut state = [0u32; 4];
    state_update(&mut state, key, NROUND2);
    for chunk in nonce.chunks_exact(4) {
        state[1] ^= FRAME_BITS_IV;
        state_update(&mut state, key, NROUND1);
        state[3] ^= le_word(chunk);
    }
    state
}

fn process_ad(state: &mut State, key: &KeyWords, ad: &[u8]) {
    let chunks = ad.chunks_exact(4);
    let tail = chunks.remainder();
    for chunk in chunks {
        state[1] ^= FRAME_BITS_AD;
        state_update(state, key, NROUND1);
        state[3] ^= le_word(chunk);
    }
    if !tail.is_empty() {
        state[1] ^= FRAME_BITS_AD;
        state_update(state, key, NROUND1);
        for (j, &b) in tail.iter().enumerate() {
            state[3] ^= u32::from(b) << (8 * j);
        }
        state[1] ^= tail.len() as u32;
    }
}

fn finalize(state: &mut State, key: &KeyWords) -> [u8; TAG_BYTES] {
    let mut tag = [0u8; TAG_BYTES];
    state[1] ^= FRAME_BITS_FINALIZATION;
    state_update(state, key, NROUND2);
    tag[..4].copy_from_slice(&state[2].to_le_bytes());

    state[1] ^= FRAME_BITS_FINALIZATION;
    state_update(state, key, NROUND1);
    tag[4..].copy_from_slice(&state[2].to_le_bytes());
    tag
}

fn key_words(key: &[u8]) -> Result<KeyWords> {
    if key.len() != KEY_BYTES {
        return Err(PufError::InvalidLength { field: "key", expected: KEY_BYTES, found: key.len() });
    }
    let mut words = [0u32; 4];
    for (w, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
        *w = le_word(chunk);
    }
    Ok(words)
}

fn check_nonce(nonce: &[u8]) -> Result<()> {
    if nonce.len() != NONCE_BYTES {
        return Err(PufError::InvalidLength { field: "nonce", expected: NONCE_BYTES, found: nonce.len() });
    }
    Ok(())
}

/// Encrypts `plaintext`, returning `ciphertext || tag`.
pub fn encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8], ad: &[u8]) -> Result<Vec<u8>> {
    let k = key_words(key)?;
    check_nonce(nonce)?;

    let mut state = initialization(&k, nonce);
    process_ad(&mut state, &k, ad);

    let mut out = Vec::with_capacity(plaintext.len() + TAG_BYTES);
    let chunks = plaintext.chunks_exact(4);
    let tail = chunks.remainder();
    for chunk in chunks {
        state[1] ^= FRAME_BITS_PC;
        state_update(&mut state, &k, NROUND2);
        let m = le_word(chunk);
        state[3] ^= m;
        out.extend_from_slice(&(state[2] ^ m).to_le_bytes());
    }
    if !tail.is_empty() {
        state[1] ^= FRAME_BITS_PC;
        state_update(&mut state, &k, NROUND2);
        for (j, &m) in tail.iter().enumerate() {
            state[3] ^= u32::from(m) << (8 * j);
            out.push((state[2] >> (8 * j)) as u8 ^ m);
        }
        state[1] ^= tail.len() as u32;
    }

    out.extend_from_slice(&finalize(&mut state, &k));
    Ok(out)
}

/// Decrypts `ciphertext || tag`. The plaintext is only released when the tag verifies.
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8], ad: &[u8]) -> Result<Vec<u8>> {
    let k = key_words(key)?;
    check_nonce(nonce)?;
    if ciphertext.len() < TAG_BYTES {
        return Err(PufError::AuthenticationFailure("ciphertext shorter than tag"));
    }
    let (body, received_tag) = ciphertext.split_at(ciphertext.len() - TAG_BYTES);

    let mut state = initialization(&k, nonce);
    process_ad(&mut state, &k, ad);

    let mut plaintext = Vec::with_capacity(body.len());
    let chunks = body.chunks_exact(4);
    let tail = chunks.remainder();
    for chunk in chunks {
        state[1] ^= FRAME_BITS_PC;
        state_update(&mut state, &k, NROUND2);
        let m = state[2] ^ le_word(chunk);
        state[3] ^= m;
        plaintext.extend_from_slice(&m.to_le_bytes());
    }
    if !tail.is_empty() {
        state[1] ^= FRAME_BITS_PC;
        state_update(&mut state, &k, NROUND2);
        for (j, &c) in tail.iter().enumerate() {
            let m = c ^ (state[2] >> (8 * j)) as u8;
            state[3] ^= u32::from(m) << (8 * j);
            plaintext.push(m);
        }
        state[1] ^= tail.len() as u32;
    }

    let tag = finalize(&mut state, &k);
    let diff = tag.iter().zip(received_tag).fold(0u8, |acc, (a, b)| acc | (a ^ b));
    if diff != 0 {
        return Err(PufError::AuthenticationFailure("tag mismatch"));
    }
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn test_key() -> Vec<u8> {
        (0u8..16).collect()
    }

    fn test_nonce() -> Vec<u8> {
        (0u8..12).collect()
    }

    #[test]
    fn test_known_answers() {
        let ct = encrypt(&test_key(), &test_nonce(), b"", b"").unwrap();
        assert_eq!(hex::encode(&ct), "c5aa7bd1e535b2d3");

        let ct = encrypt(&test_key(), &test_nonce(), &[0xAA], b"").unwrap();
        assert_eq!(hex::encode(&ct), "d244289002a2ec7c8f");

        let ct = encrypt(&test_key(), &test_nonce(), b"hello", b"").unwrap();
        assert_eq!(hex::encode(&ct), "101e9842bc3d061bff73cb7089");

        let ct = encrypt(&test_key(), &test_nonce(), b"hello", &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(hex::encode(&ct), "385c366ae6d6bb80af3728b99d");
    }

    #[test]
    fn test_output_length_adds_tag() {
        for len in [0usize, 1, 3, 4, 5, 8, 17] {
            let pt = vec![0x5A; len];
            let ct = encrypt(&test_key(), &test_nonce(), &pt, b"").unwrap();
            assert_eq!(ct.len(), len + TAG_BYTES);
        }
    }

    #[test]
    fn test_decrypt_round_trip_with_ad() {
        let pt = b"challenge bytes, odd length!!";
        let ad = b"hdr";
        let ct = encrypt(&test_key(), &test_nonce(), pt, ad).unwrap();
        assert_eq!(decrypt(&test_key(), &test_nonce(), &ct, ad).unwrap(), pt.to_vec());
    }

    #[test]
    fn test_decrypt_rejects_tampering() {
        let mut ct = encrypt(&test_key(), &test_nonce(), b"hello", b"").unwrap();
        ct[0] ^= 0x01;
        let err = decrypt(&test_key(), &test_nonce(), &ct, b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);

        let ct = encrypt(&test_key(), &test_nonce(), b"hello", b"").unwrap();
        assert!(decrypt(&test_key(), &test_nonce(), &ct, b"x").is_err());
        assert!(decrypt(&test_key(), &test_nonce(), &ct[..4], b"").is_err());
    }

    #[test]
    fn test_rejects_wrong_sizes() {
        let err = encrypt(&[0u8; 15], &test_nonce(), b"", b"").unwrap_err();
        assert!(matches!(err, PufError::InvalidLength { field: "key", expected: 16, found: 15 }));
        let err = encrypt(&test_key(), &[0u8; 8], b"", b"").unwrap_err();
        assert!(matches!(err, PufError::InvalidLength { field: "nonce", expected: 12, found: 8 }));
    }
}
