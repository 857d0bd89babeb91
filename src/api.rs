//! WebAssembly bindings for constructing and evaluating crypto PUFs.
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

use crate::crp::ChallengeResponseSet;
use crate::error::PufError;
use crate::puf::{CryptoPuf, Simulation};

fn to_js(err: PufError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS-facing crypto PUF. Challenges cross the boundary as one flat,
/// row-major `Int8Array` of `count * challenge_length` values.
#[wasm_bindgen]
pub struct WasmCryptoPuf {
    inner: CryptoPuf,
}

#[wasm_bindgen]
impl WasmCryptoPuf {
    #[wasm_bindgen(constructor)]
    pub fn new(
        challenge_length: usize,
        key: String,
        nonce: String,
        variant: String,
        seed: Option<u64>,
    ) -> Result<WasmCryptoPuf, JsValue> {
        let inner = CryptoPuf::new(challenge_length, &key, &nonce, &variant, seed).map_err(to_js)?;
        Ok(WasmCryptoPuf { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn challenge_length(&self) -> usize {
        self.inner.challenge_length()
    }

    #[wasm_bindgen(getter)]
    pub fn response_length(&self) -> usize {
        self.inner.response_length()
    }

    /// Evaluates the flat challenge buffer; returns one response per row.
    pub fn eval(&self, flat_challenges: Vec<i8>) -> Result<Vec<i8>, JsValue> {
        let n = self.inner.challenge_length();
        if flat_challenges.len() % n != 0 {
            return Err(JsValue::from_str(&format!(
                "challenge buffer of {} values is not a multiple of challenge length {}",
                flat_challenges.len(),
                n
            )));
        }
        let rows: Vec<&[i8]> = flat_challenges.chunks(n).collect();
        self.inner.eval(&rows).map_err(to_js)
    }

    /// Generates `count` seeded challenges, evaluates them and returns the set as JSON.
    pub fn crp_json(&self, count: usize, seed: u64) -> Result<String, JsValue> {
        ChallengeResponseSet::from_simulation(&self.inner, count, seed)
            .and_then(|crps| crps.to_json())
            .map_err(to_js)
    }
}
