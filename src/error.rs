//! Error types shared by every stage of the challenge-to-response pipeline.

use thiserror::Error;

/// Broad failure category. Callers that only need to know which stage
/// rejected their input can match on this instead of individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported variant, bad key/nonce, malformed configuration.
    Configuration,
    /// A challenge (or a challenge-response set) has the wrong shape or values.
    Validation,
    /// The cipher produced fewer bytes than response extraction needs.
    CipherContract,
    /// Decryption rejected the authentication tag.
    Authentication,
    /// The OS entropy source could not seed a generator.
    Entropy,
}

/// Problem with a single challenge vector, independent of its batch position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("challenge has length {found}, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("value {value} at position {position} is not -1 or 1")]
    NotBipolar { position: usize, value: i8 },
}

#[derive(Debug, Error)]
pub enum PufError {
    #[error("unsupported crypto core: {0}")]
    UnsupportedVariant(String),

    #[error("challenge length must be positive")]
    ZeroChallengeLength,

    #[error("{field} must be {expected} bytes, got {found}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{field} is not valid hex: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("malformed JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("challenge {index} rejected: {source}")]
    InvalidChallenge {
        index: usize,
        #[source]
        source: ChallengeError,
    },

    #[error("inconsistent challenge-response set: {0}")]
    InconsistentCrpSet(String),

    #[error("cipher output is {found} bytes; response extraction needs at least {required}")]
    CipherContractViolation { required: usize, found: usize },

    #[error("authentication failed: {0}")]
    AuthenticationFailure(&'static str),

    #[error("entropy source unavailable: {0}")]
    Entropy(getrandom::Error),
}

impl PufError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PufError::UnsupportedVariant(_)
            | PufError::ZeroChallengeLength
            | PufError::InvalidLength { .. }
            | PufError::InvalidHex { .. }
            | PufError::Serialization(_) => ErrorKind::Configuration,
            PufError::InvalidChallenge { .. } | PufError::InconsistentCrpSet(_) => {
                ErrorKind::Validation
            }
            PufError::CipherContractViolation { .. } => ErrorKind::CipherContract,
            PufError::AuthenticationFailure(_) => ErrorKind::Authentication,
            PufError::Entropy(_) => ErrorKind::Entropy,
        }
    }
}

pub type Result<T> = core::result::Result<T, PufError>;
