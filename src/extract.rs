//! Maps cipher output to a single bipolar response bit.

use crate::error::{PufError, Result};
use crate::params::{MIN_CIPHER_OUTPUT_BYTES, RESPONSE_BIT_INDEX};
use crate::types::Response;

/// Reads bit `RESPONSE_BIT_INDEX` of `output` and maps 0 -> -1, 1 -> 1.
///
/// Bits are numbered MSB-first within each byte, bytes in order, so bit 127
/// is the least-significant bit of byte 15 (`output[15] & 1`).
pub fn extract_response(output: &[u8]) -> Result<Response> {
    if output.len() < MIN_CIPHER_OUTPUT_BYTES {
        return Err(PufError::CipherContractViolation {
            required: MIN_CIPHER_OUTPUT_BYTES,
            found: output.len(),
        });
    }
    let byte = output[RESPONSE_BIT_INDEX / 8];
    let bit = (byte >> (7 - RESPONSE_BIT_INDEX % 8)) & 1;
    Ok(if bit == 1 { 1 } else { -1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_reads_lsb_of_byte_15() {
        let mut output = vec![0u8; 16];
        assert_eq!(extract_response(&output).unwrap(), -1);

        output[15] = 0x01;
        assert_eq!(extract_response(&output).unwrap(), 1);

        // bit 120 (MSB of byte 15) does not count
        output[15] = 0x80;
        assert_eq!(extract_response(&output).unwrap(), -1);

        // every other bit set, bit 127 clear
        let mut output = vec![0xFFu8; 24];
        output[15] = 0xFE;
        assert_eq!(extract_response(&output).unwrap(), -1);
    }

    #[test]
    fn test_neighbouring_bytes_do_not_count() {
        let mut output = vec![0u8; 17];
        output[14] = 0x01;
        output[16] = 0x80;
        assert_eq!(extract_response(&output).unwrap(), -1);
    }

    #[test]
    fn test_ignores_bytes_past_16() {
        let mut output = vec![0xFFu8; 32];
        output[15] = 0x01;
        assert_eq!(extract_response(&output).unwrap(), 1);
        output[15] = 0x00;
        assert_eq!(extract_response(&output).unwrap(), -1);
    }

    #[test]
    fn test_fifteen_bytes_is_contract_violation() {
        let err = extract_response(&[0xFF; 15]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CipherContract);
        assert!(matches!(err, PufError::CipherContractViolation { required: 16, found: 15 }));
        assert!(extract_response(&[]).is_err());
    }
}
