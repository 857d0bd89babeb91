//! Construction parameters for a crypto PUF, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_variant() -> String {
    "tinyjambu".to_string()
}

/// Everything needed to rebuild a PUF instance. Two instances built from
/// equal configs produce identical responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PufConfig {
    pub challenge_length: usize,
    /// Hex-encoded cipher key.
    pub key: String,
    /// Hex-encoded cipher nonce, reused for every challenge.
    pub nonce: String,
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Seeds auxiliary randomness (challenge generation) only.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PufConfig {
    pub fn new(challenge_length: usize, key: &str, nonce: &str) -> Self {
        PufConfig {
            challenge_length,
            key: key.to_string(),
            nonce: nonce.to_string(),
            variant: default_variant(),
            seed: None,
        }
    }

    pub fn with_variant(mut self, variant: &str) -> Self {
        self.variant = variant.to_string();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
