//! Challenge-response sets: random challenges paired with the responses a
//! simulation gives for them, serializable to JSON.

use serde::{Deserialize, Serialize};

use crate::error::{PufError, Result};
use crate::puf::Simulation;
use crate::random::ChallengeGenerator;
use crate::types::{Challenge, Response};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponseSet {
    pub challenge_length: usize,
    pub challenges: Vec<Challenge>,
    pub responses: Vec<Response>,
}

impl ChallengeResponseSet {
    /// Pairs checked for shape: equal counts, every challenge of
    /// `challenge_length`, every value bipolar.
    pub fn new(challenge_length: usize, challenges: Vec<Challenge>, responses: Vec<Response>) -> Result<Self> {
        let set = ChallengeResponseSet { challenge_length, challenges, responses };
        set.check_shape()?;
        Ok(set)
    }

    /// Draws `count` challenges from a generator seeded with `seed` and
    /// evaluates them on `simulation`.
    pub fn from_simulation<S: Simulation>(simulation: &S, count: usize, seed: u64) -> Result<Self> {
        let mut generator = ChallengeGenerator::from_seed(seed);
        Self::from_generator(simulation, count, &mut generator)
    }

    pub fn from_generator<S: Simulation>(
        simulation: &S,
        count: usize,
        generator: &mut ChallengeGenerator,
    ) -> Result<Self> {
        let challenge_length = simulation.challenge_length();
        let challenges = generator.challenges(count, challenge_length);
        let responses = simulation.eval(&challenges)?;
        Ok(ChallengeResponseSet { challenge_length, challenges, responses })
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Challenge, Response)> + '_ {
        self.challenges.iter().zip(self.responses.iter().copied())
    }

    /// True if `simulation` gives exactly the recorded responses.
    pub fn reproduces<S: Simulation>(&self, simulation: &S) -> Result<bool> {
        if simulation.challenge_length() != self.challenge_length {
            return Ok(false);
        }
        Ok(simulation.eval(&self.challenges)? == self.responses)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let set: ChallengeResponseSet = serde_json::from_str(json)?;
        set.check_shape()?;
        Ok(set)
    }

    fn check_shape(&self) -> Result<()> {
        if self.challenges.len() != self.responses.len() {
            return Err(PufError::InconsistentCrpSet(format!(
                "{} challenges but {} responses",
                self.challenges.len(),
                self.responses.len()
            )));
        }
        for (i, c) in self.challenges.iter().enumerate() {
            if c.len() != self.challenge_length {
                return Err(PufError::InconsistentCrpSet(format!(
                    "challenge {} has length {}, expected {}",
                    i,
                    c.len(),
                    self.challenge_length
                )));
            }
            if c.iter().any(|&v| v != 1 && v != -1) {
                return Err(PufError::InconsistentCrpSet(format!("challenge {} is not bipolar", i)));
            }
        }
        if let Some(i) = self.responses.iter().position(|&r| r != 1 && r != -1) {
            return Err(PufError::InconsistentCrpSet(format!("response {} is not bipolar", i)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::puf::CryptoPuf;

    const KEY: &str = "000102030405060708090A0B0C0D0E0F";
    const NONCE: &str = "000102030405060708090A0B";

    fn puf(challenge_length: usize) -> CryptoPuf {
        CryptoPuf::new(challenge_length, KEY, NONCE, "tinyjambu", None).unwrap()
    }

    #[test]
    fn test_from_simulation_pinned() {
        let crps = ChallengeResponseSet::from_simulation(&puf(64), 6, 7).unwrap();
        assert_eq!(crps.len(), 6);
        assert_eq!(crps.challenge_length, 64);
        assert_eq!(crps.responses, vec![-1, -1, 1, -1, 1, 1]);

        let crps = ChallengeResponseSet::from_simulation(&puf(128), 6, 7).unwrap();
        assert_eq!(crps.responses, vec![1, -1, -1, -1, 1, 1]);
    }

    #[test]
    fn test_reproduces() {
        let crps = ChallengeResponseSet::from_simulation(&puf(64), 10, 3).unwrap();
        assert!(crps.reproduces(&puf(64)).unwrap());

        let other_key = CryptoPuf::new(64, "ff".repeat(16).as_str(), NONCE, "tinyjambu", None).unwrap();
        let mut flipped = crps.clone();
        for r in flipped.responses.iter_mut() {
            *r = -*r;
        }
        assert!(!flipped.reproduces(&puf(64)).unwrap());
        // a different key may or may not agree on 10 bits, but evaluation must succeed
        assert!(crps.reproduces(&other_key).is_ok());
        assert!(!crps.reproduces(&puf(65)).unwrap());
    }

    #[test]
    fn test_json_round_trip() {
        let crps = ChallengeResponseSet::from_simulation(&puf(64), 4, 1).unwrap();
        let back = ChallengeResponseSet::from_json(&crps.to_json().unwrap()).unwrap();
        assert_eq!(back, crps);
        assert_eq!(back.iter().count(), 4);
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        let err = ChallengeResponseSet::from_json(
            r#"{"challenge_length":2,"challenges":[[1,-1],[1,1]],"responses":[1]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(ChallengeResponseSet::from_json(
            r#"{"challenge_length":2,"challenges":[[1,0]],"responses":[1]}"#
        )
        .is_err());
        assert!(ChallengeResponseSet::from_json(
            r#"{"challenge_length":3,"challenges":[[1,-1]],"responses":[1]}"#
        )
        .is_err());
        assert!(ChallengeResponseSet::from_json(
            r#"{"challenge_length":2,"challenges":[[1,-1]],"responses":[0]}"#
        )
        .is_err());
    }

    #[test]
    fn test_new_and_empty() {
        let empty = ChallengeResponseSet::new(8, vec![], vec![]).unwrap();
        assert!(empty.is_empty());
        assert!(ChallengeResponseSet::new(2, vec![vec![1, -1]], vec![]).is_err());
    }
}
