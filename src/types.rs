use std::fmt;

use crate::hash::key_fingerprint;

/// One challenge element or response: -1 or 1.
pub type Bipolar = i8;

/// Ordered challenge vector of `challenge_length` bipolar values.
pub type Challenge = Vec<Bipolar>;

/// Single-bit PUF response in bipolar form.
pub type Response = Bipolar;

/// Cipher key, fixed for the lifetime of a PUF instance.
/// `Debug` prints a fingerprint instead of the key bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Key(pub Vec<u8>);

impl Key {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.0)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(fp:{})", self.fingerprint())
    }
}

/// Cipher nonce. Reused for every challenge one PUF instance evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(pub Vec<u8>);

impl Nonce {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Bit-packed challenge, `ceil(challenge_length / 8)` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeBytes(pub Vec<u8>);

/// Ciphertext followed by the authentication tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherOutput(pub Vec<u8>);

impl AsRef<[u8]> for ChallengeBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for CipherOutput {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_debug_hides_bytes() {
        let key = Key(vec![0xAB; 16]);
        let shown = format!("{:?}", key);
        assert_eq!(shown, "Key(fp:75e58e5c8a042f80)");
    }
}
