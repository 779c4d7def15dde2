//! Field text codec - standard base64 over bit-packed cell states.
//!
//! Cells are flattened row-major, padded with dead cells up to a byte
//! boundary, and packed eight to a byte with the first cell of each group in
//! the least significant bit. The text form carries no geometry: the decoder
//! is told the target edge length and ignores any surplus bits, so one
//! encoding can seed any field it has enough bits for.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::Field;

/// Field decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Input is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Payload carries {available} bits but a field of size {size} needs {needed}")]
    NotEnoughBits {
        size: usize,
        needed: usize,
        available: usize,
    },
}

/// Encode a field as base64 text.
pub fn encode(field: &Field) -> String {
    let cells = field.cells();
    let mut bytes = vec![0u8; cells.len().div_ceil(8)];
    for (i, &alive) in cells.iter().enumerate() {
        if alive {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    STANDARD.encode(&bytes)
}

/// Decode base64 text into a field of the given edge length.
///
/// Surrounding whitespace is tolerated. Decoding fails only on malformed
/// base64 or a payload too short for `size * size` cells.
pub fn decode(text: &str, size: usize) -> Result<Field, CodecError> {
    let bytes = STANDARD.decode(text.trim())?;

    let needed = size * size;
    let available = bytes.len() * 8;
    if available < needed {
        return Err(CodecError::NotEnoughBits {
            size,
            needed,
            available,
        });
    }

    let cells = (0..needed)
        .map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1)
        .collect();
    Ok(Field::from_cells(size, cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // A 20x20 sample captured from a live session.
    const SAMPLE_20: &str =
        "AAAAAAAAAAAAAMADAAINEAABARAAAAEAEAAAAQAQEAABAhggAAEMCgBHAAAAAAAAAAA=";

    #[test]
    fn test_empty_field_packs_to_zero_bytes() {
        assert_eq!(encode(&Field::empty(2)), "AA==");
    }

    #[test]
    fn test_decode_zero_bytes_is_all_dead() {
        let field = decode("AA==", 2).unwrap();
        assert_eq!(field.census().alive, 0);
    }

    #[test]
    fn test_first_cell_lands_in_least_significant_bit() {
        let mut field = Field::empty(3);
        field.set(0, 0, true);
        // 9 cells pack into two bytes: [0x01, 0x00].
        assert_eq!(encode(&field), "AQA=");

        let mut field = Field::empty(3);
        field.set(0, 1, true);
        assert_eq!(encode(&field), "AgA=");
    }

    #[test]
    fn test_padding_bits_do_not_leak() {
        // 9 cells pad to 16 bits; the last cell sits in the second byte.
        let mut field = Field::empty(3);
        field.set(2, 2, true);
        let decoded = decode(&encode(&field), 3).unwrap();
        assert_eq!(decoded, field);
    }

    #[test]
    fn test_sample_roundtrips() {
        let field = decode(SAMPLE_20, 20).unwrap();
        assert_eq!(field.size(), 20);
        assert_eq!(field.census().alive, 31);
        assert_eq!(encode(&field), SAMPLE_20);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(matches!(
            decode("not base64!!!", 4),
            Err(CodecError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_decode_rejects_short_payload() {
        // One byte holds 8 bits; a 4x4 field needs 16.
        let err = decode("AA==", 4).unwrap_err();
        match err {
            CodecError::NotEnoughBits {
                size,
                needed,
                available,
            } => {
                assert_eq!(size, 4);
                assert_eq!(needed, 16);
                assert_eq!(available, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_discards_surplus_bits() {
        let mut large = Field::empty(20);
        large.set(0, 0, true);
        large.set(0, 3, true);
        large.set(0, 19, true);

        // A 4x4 target consumes only the first 16 bits of the payload.
        let small = decode(&encode(&large), 4).unwrap();
        let expected = Field::from_cells(4, large.cells()[..16].to_vec());
        assert_eq!(small, expected);
    }

    #[test]
    fn test_decode_trims_surrounding_whitespace() {
        assert!(decode("AA==\n", 2).is_ok());
        assert!(decode("  AA==  ", 2).is_ok());
        // Interior whitespace is still malformed.
        assert!(decode("A A==", 2).is_err());
    }

    fn field_strategy() -> impl Strategy<Value = Field> {
        (1usize..=24).prop_flat_map(|size| {
            proptest::collection::vec(any::<bool>(), size * size)
                .prop_map(move |cells| Field::from_cells(size, cells))
        })
    }

    proptest! {
        #[test]
        fn roundtrip_preserves_every_cell(field in field_strategy()) {
            let encoded = encode(&field);
            let decoded = decode(&encoded, field.size()).unwrap();
            prop_assert_eq!(&decoded, &field);
            prop_assert_eq!(encode(&decoded), encoded);
        }
    }
}
