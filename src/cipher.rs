//! The keyed, deterministic AEAD contract the PUF evaluator is built on.

use crate::error::Result;
use crate::params::CipherVariant;
use crate::tinyjambu;

/// A keyed, deterministic authenticated cipher.
///
/// `encrypt` must return identical output for identical inputs and must
/// produce `plaintext.len() + tag_length` bytes. `decrypt` releases the
/// plaintext only if authentication succeeds and otherwise returns
/// `PufError::AuthenticationFailure`.
pub trait CipherCore {
    fn encrypt(&self, key: &[u8], nonce: &[u8], plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;

    fn decrypt(&self, key: &[u8], nonce: &[u8], ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TinyJambu128;

impl CipherCore for TinyJambu128 {
    fn encrypt(&self, key: &[u8], nonce: &[u8], plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        tinyjambu::encrypt(key, nonce, plaintext, associated_data)
    }

    fn decrypt(&self, key: &[u8], nonce: &[u8], ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        tinyjambu::decrypt(key, nonce, ciphertext, associated_data)
    }
}

impl CipherCore for CipherVariant {
    fn encrypt(&self, key: &[u8], nonce: &[u8], plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        match self {
            CipherVariant::TinyJambu128(_) => TinyJambu128.encrypt(key, nonce, plaintext, associated_data),
        }
    }

    fn decrypt(&self, key: &[u8], nonce: &[u8], ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        match self {
            CipherVariant::TinyJambu128(_) => TinyJambu128.decrypt(key, nonce, ciphertext, associated_data),
        }
    }
}
