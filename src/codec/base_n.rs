//! Positional base-N representations: Id22 (base58) and Id25 (base35)
//!
//! Both treat the 16 bytes as one unsigned big-endian 128-bit integer and emit its digits most
//! significant first, left-padded with the zero symbol to a fixed width.

use super::{alphabet::Alphabet, Format};
use crate::ParseError;

/// Encodes `bytes` to exactly `LEN` digits of `alphabet`.
///
/// `LEN` must be large enough to hold any 128-bit value, or the most significant digits are lost.
pub(crate) fn encode<const N: usize, const LEN: usize>(
    alphabet: &Alphabet<N>,
    bytes: &[u8; 16],
) -> [u8; LEN] {
    let radix = alphabet.radix() as u128;
    let mut number = u128::from_be_bytes(*bytes);
    let mut buffer = [0u8; LEN];
    for e in buffer.iter_mut().rev() {
        *e = alphabet.digit((number % radix) as usize);
        number /= radix;
    }
    debug_assert_eq!(number, 0);
    buffer
}

/// Decodes the digits of `alphabet` found in `chars`, skipping every other character.
///
/// Fails unless exactly `expected` digits are found. Values that do not fit in 128 bits keep
/// their low 128 bits.
pub(crate) fn decode<const N: usize>(
    alphabet: &Alphabet<N>,
    chars: impl Iterator<Item = char>,
    expected: usize,
    format: Format,
) -> Result<[u8; 16], ParseError> {
    let radix = alphabet.radix() as u128;
    let mut number = 0u128;
    let mut found = 0;
    for value in chars.filter_map(|c| alphabet.value_of(c)) {
        number = number.wrapping_mul(radix).wrapping_add(value as u128);
        found += 1;
    }

    if found == expected {
        Ok(number.to_be_bytes())
    } else {
        Err(ParseError::InvalidLength {
            format,
            expected,
            found,
        })
    }
}

/// Encodes to the 22-character Id22 form.
pub(crate) fn encode_id22(bytes: &[u8; 16]) -> [u8; 22] {
    encode(&super::alphabet::BASE58, bytes)
}

/// Decodes the Id22 form.
pub(crate) fn decode_id22(src: &str) -> Result<[u8; 16], ParseError> {
    decode(&super::alphabet::BASE58, src.chars(), 22, Format::Id22)
}

/// Encodes to the 25-character Id25 form.
pub(crate) fn encode_id25(bytes: &[u8; 16]) -> [u8; 25] {
    encode(&super::alphabet::BASE35, bytes)
}

/// Decodes the Id25 form.
pub(crate) fn decode_id25(src: &str) -> Result<[u8; 16], ParseError> {
    decode(&super::alphabet::BASE35, src.chars(), 25, Format::Id25)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a collection of prepared cases: bytes, Id22, Id25
    fn prepare_cases() -> &'static [([u8; 16], &'static str, &'static str)] {
        &[
            ([0; 16], "1111111111111111111111", "0000000000000000000000000"),
            (
                [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                "1111111111111111111112",
                "0000000000000000000000001",
            ),
            (
                [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
                "1111111111111111111113",
                "0000000000000000000000002",
            ),
            (
                [0, 0, 0, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 0, 0],
                "111111111112WK48GNSUQf",
                "00000000000006q3abpe675nu",
            ),
            (
                [
                    0, 1, 2, 3, 52, 53, 118, 119, 184, 185, 250, 251, 252, 253, 254, 255,
                ],
                "112drYSDr45nCJ6chixdxJ",
                "000jnpiacvek52kvka6to5ogn",
            ),
            (
                [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                "18AQGAut7N92awznwCnjuR",
                "042kt5d5ybb4r50zg5p72g3f1",
            ),
            (
                [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                "1FKoXLpmDjH4AtzasQaUoq",
                "0856marbwnn9ha1yxbde4x6v2",
            ),
            ([0xff; 16], "YcVfxkQb6JRzqk5kF2tNLv", "usz5xbbiqsfq7s727n0pzr2xa"),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (bytes, id22, id25) in prepare_cases() {
            assert_eq!(&encode_id22(bytes), id22.as_bytes());
            assert_eq!(&encode_id25(bytes), id25.as_bytes());
            assert_eq!(decode_id22(id22), Ok(*bytes));
            assert_eq!(decode_id25(id25), Ok(*bytes));
            assert_eq!(decode_id25(&id25.to_uppercase()), Ok(*bytes));
        }
    }

    /// Skips characters outside the alphabet
    #[test]
    fn skips_characters_outside_the_alphabet() {
        let expected = [
            0, 1, 2, 3, 52, 53, 118, 119, 184, 185, 250, 251, 252, 253, 254, 255,
        ];
        assert_eq!(decode_id22("112d/rYSD/r45/nCJ6/chix/dxJ"), Ok(expected));
        assert_eq!(decode_id25("00/0jn/pi/acv/ek/52k/vk/a6t/o5/ogn"), Ok(expected));
        assert_eq!(decode_id22("YcVfx kQb6JR zqk5k F2tNLv"), Ok([0xff; 16]));
        assert_eq!(decode_id25("usz5x bbiqs fq7s7 27n0p zr2xa"), Ok([0xff; 16]));
    }

    /// Treats Id22 as case-sensitive
    #[test]
    fn treats_id22_as_case_sensitive() {
        let lower = decode_id22("111111111111111111111a").unwrap();
        let upper = decode_id22("111111111111111111111A").unwrap();
        assert_eq!(u128::from_be_bytes(lower), 33);
        assert_eq!(u128::from_be_bytes(upper), 9);
    }

    /// Reports digit count mismatch
    #[test]
    fn reports_digit_count_mismatch() {
        let id22_cases = ["", "X", "YcVfx kQb6JR zqk5k F2tNL", "YcVfx kQb6JR zqk5k F2tNLvv"];
        for e in id22_cases {
            assert!(matches!(
                decode_id22(e),
                Err(ParseError::InvalidLength {
                    format: Format::Id22,
                    expected: 22,
                    ..
                })
            ));
        }

        let id25_cases = [
            "",
            "X",
            "usz5x bbiqs fq7s7 27n0p zr2x",
            "usz5x bbiqs fq7s7 27n0p zr2xaa",
        ];
        for e in id25_cases {
            assert!(matches!(
                decode_id25(e),
                Err(ParseError::InvalidLength {
                    format: Format::Id25,
                    expected: 25,
                    ..
                })
            ));
        }
    }

    /// Keeps low 128 bits of oversized values
    #[test]
    fn keeps_low_128_bits_of_oversized_values() {
        // 58^22 - 1 and 35^25 - 1 both exceed u128::MAX
        let id22_max = decode_id22("zzzzzzzzzzzzzzzzzzzzzz").unwrap();
        let id25_max = decode_id25("zzzzzzzzzzzzzzzzzzzzzzzzz").unwrap();
        let expect22 = (0..22).fold(0u128, |acc, _| acc.wrapping_mul(58).wrapping_add(57));
        let expect25 = (0..25).fold(0u128, |acc, _| acc.wrapping_mul(35).wrapping_add(34));
        assert_eq!(u128::from_be_bytes(id22_max), expect22);
        assert_eq!(u128::from_be_bytes(id25_max), expect25);
    }
}
