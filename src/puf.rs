//! Crypto PUF: emulates a challenge-response PUF by encrypting each challenge
//! with a keyed, deterministic AEAD and reading one fixed bit of the output.

use log::{debug, trace, warn};

use crate::cipher::CipherCore;
use crate::codec::{decode_hex_field, encode_challenge};
use crate::config::PufConfig;
use crate::error::{ChallengeError, PufError, Result};
use crate::extract::extract_response;
use crate::params::{CipherVariant, RESPONSE_LENGTH};
use crate::random::ChallengeGenerator;
use crate::types::{Bipolar, ChallengeBytes, CipherOutput, Key, Nonce, Response};

/// Calling convention shared by PUF simulations.
pub trait Simulation {
    fn challenge_length(&self) -> usize;

    fn response_length(&self) -> usize;

    /// Evaluates a batch of challenges, returning one response per challenge
    /// in input order. Any invalid challenge fails the whole batch.
    fn eval<C: AsRef<[Bipolar]>>(&self, challenges: &[C]) -> Result<Vec<Response>>;

    /// Evaluates the batch `repetitions` times. Entry `i` of the result holds
    /// the `repetitions` responses observed for challenge `i`.
    fn r_eval<C: AsRef<[Bipolar]>>(&self, repetitions: usize, challenges: &[C]) -> Result<Vec<Vec<Response>>> {
        let mut responses = vec![Vec::with_capacity(repetitions); challenges.len()];
        for _ in 0..repetitions {
            for (row, r) in responses.iter_mut().zip(self.eval(challenges)?) {
                row.push(r);
            }
        }
        Ok(responses)
    }
}

/// PUF emulated on top of a keyed cipher core.
///
/// Responses are a pure function of (key, nonce, challenge): the instance holds
/// no mutable state and every field is fixed at construction.
///
/// **Nonce reuse.** The same nonce encrypts every challenge this instance
/// evaluates. Standard AEAD usage forbids this because it breaks
/// confidentiality across messages; here it is what makes a challenge's
/// response reproducible. Do not use an instance's ciphertexts for anything
/// but response derivation.
#[derive(Debug, Clone)]
pub struct CryptoPuf<C: CipherCore = CipherVariant> {
    challenge_length: usize,
    key: Key,
    nonce: Nonce,
    variant: CipherVariant,
    seed: Option<u64>,
    cipher: C,
}

impl CryptoPuf<CipherVariant> {
    pub fn new(challenge_length: usize, key: &str, nonce: &str, variant: &str, seed: Option<u64>) -> Result<Self> {
        let config = PufConfig {
            challenge_length,
            key: key.to_string(),
            nonce: nonce.to_string(),
            variant: variant.to_string(),
            seed,
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &PufConfig) -> Result<Self> {
        let variant = CipherVariant::from_name(&config.variant)?;
        Self::build(config, variant, variant)
    }
}

impl<C: CipherCore> CryptoPuf<C> {
    /// Builds an instance that routes encryption through `cipher` instead of
    /// the variant's own core. The variant name is still resolved (and key and
    /// nonce sizes checked against it) before `cipher` is ever used.
    pub fn with_cipher(config: &PufConfig, cipher: C) -> Result<Self> {
        let variant = CipherVariant::from_name(&config.variant)?;
        Self::build(config, variant, cipher)
    }

    fn build(config: &PufConfig, variant: CipherVariant, cipher: C) -> Result<Self> {
        if config.challenge_length == 0 {
            return Err(PufError::ZeroChallengeLength);
        }
        let key = Key(decode_hex_field("key", &config.key, variant.key_bytes())?);
        let nonce = Nonce(decode_hex_field("nonce", &config.nonce, variant.nonce_bytes())?);

        debug!(
            "initializing crypto PUF on {} core: challenge_length={}, key fp={}",
            variant.name(),
            config.challenge_length,
            key.fingerprint()
        );
        if config.challenge_length < variant.min_challenge_length() {
            warn!(
                "challenge_length {} is below {}: {} output is too short to carry response bit, eval will fail",
                config.challenge_length,
                variant.min_challenge_length(),
                variant.name()
            );
        }

        Ok(CryptoPuf {
            challenge_length: config.challenge_length,
            key,
            nonce,
            variant,
            seed: config.seed,
            cipher,
        })
    }

    pub fn variant(&self) -> CipherVariant {
        self.variant
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Generator for random challenges of this instance's length, seeded from
    /// the configured seed or from OS entropy when none was given. Has no
    /// effect on responses.
    pub fn challenge_generator(&self) -> Result<ChallengeGenerator> {
        match self.seed {
            Some(seed) => Ok(ChallengeGenerator::from_seed(seed)),
            None => ChallengeGenerator::from_entropy(),
        }
    }

    fn encode_batch<B: AsRef<[Bipolar]>>(&self, challenges: &[B]) -> Result<Vec<ChallengeBytes>> {
        challenges
            .iter()
            .enumerate()
            .map(|(index, challenge)| {
                let challenge = challenge.as_ref();
                if challenge.len() != self.challenge_length {
                    return Err(PufError::InvalidChallenge {
                        index,
                        source: ChallengeError::WrongLength {
                            expected: self.challenge_length,
                            found: challenge.len(),
                        },
                    });
                }
                encode_challenge(challenge).map_err(|source| PufError::InvalidChallenge { index, source })
            })
            .collect()
    }

    fn respond(&self, challenge_bytes: &ChallengeBytes) -> Result<Response> {
        let output = CipherOutput(self.cipher.encrypt(
            self.key.as_bytes(),
            self.nonce.as_bytes(),
            challenge_bytes.as_ref(),
            &[],
        )?);
        extract_response(output.as_ref())
    }
}

impl<C: CipherCore> Simulation for CryptoPuf<C> {
    fn challenge_length(&self) -> usize {
        self.challenge_length
    }

    fn response_length(&self) -> usize {
        RESPONSE_LENGTH
    }

    fn eval<B: AsRef<[Bipolar]>>(&self, challenges: &[B]) -> Result<Vec<Response>> {
        // Validate the whole batch before the first cipher call.
        let encoded = self.encode_batch(challenges)?;
        trace!("evaluating {} challenges on {} core", encoded.len(), self.variant.name());
        encoded.iter().map(|bytes| self.respond(bytes)).collect()
    }
}
