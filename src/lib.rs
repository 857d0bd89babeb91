//! Crypto PUF: an emulated Physically Unclonable Function whose responses come
//! from a keyed, deterministic authenticated cipher instead of silicon variation.
//!
//! A bipolar challenge is bit-packed, encrypted under a fixed key and nonce,
//! and bit 127 of the ciphertext-plus-tag becomes the response.

pub mod error;
pub mod params;
pub mod types;
pub mod hash;
pub mod codec;
pub mod tinyjambu;
pub mod cipher;
pub mod extract;
pub mod config;
pub mod random;
pub mod puf;
pub mod crp;

pub mod api;
pub use api::WasmCryptoPuf;

pub use cipher::{CipherCore, TinyJambu128};
pub use codec::{decode_challenge, encode_challenge};
pub use config::PufConfig;
pub use crp::ChallengeResponseSet;
pub use error::{ChallengeError, ErrorKind, PufError, Result};
pub use extract::extract_response;
pub use params::{CipherParams, CipherVariant, RESPONSE_BIT_INDEX, RESPONSE_LENGTH};
pub use puf::{CryptoPuf, Simulation};
pub use random::ChallengeGenerator;
pub use types::{Bipolar, Challenge, Response};
