//! Content fingerprinting for upload comparison
//!
//! The remote store advertises a CRC-64 of every object's bytes (the
//! reflected ECMA-182 polynomial, catalogued as CRC-64/XZ) rendered as a
//! decimal string. The local side must produce the identical rendering for
//! identical bytes, so records compare by exact string equality.

use crc::{Crc, CRC_64_XZ};
use preflight_types::Fingerprinter;

const CRC64: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

/// Compute the CRC-64 of a complete byte buffer
pub fn crc64(data: &[u8]) -> u64 {
    CRC64.checksum(data)
}

/// Default fingerprinter: CRC-64 rendered as an unsigned decimal string
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc64Fingerprinter;

impl Fingerprinter for Crc64Fingerprinter {
    fn fingerprint(&self, data: &[u8]) -> String {
        crc64(data).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // Catalogue check value for CRC-64/XZ.
        assert_eq!(crc64(b"123456789"), 0x995D_C9BB_DF19_39FA);
        assert_eq!(
            Crc64Fingerprinter.fingerprint(b"123456789"),
            "11051210869376104954"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Crc64Fingerprinter.fingerprint(b""), "0");
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox";
        assert_eq!(
            Crc64Fingerprinter.fingerprint(data),
            Crc64Fingerprinter.fingerprint(data)
        );
    }

    #[test]
    fn test_distinct_inputs_differ() {
        assert_ne!(
            Crc64Fingerprinter.fingerprint(b"hi"),
            Crc64Fingerprinter.fingerprint(b"bye")
        );
    }

    #[test]
    fn test_rendering_has_no_padding() {
        // Decimal rendering of the raw u64, no leading zeros or prefixes.
        let rendered = Crc64Fingerprinter.fingerprint(b"123456789");
        assert_eq!(rendered, crc64(b"123456789").to_string());
        assert!(!rendered.starts_with('0'));
    }
}
