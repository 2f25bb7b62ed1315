//! Textual representations of the 16 identifier bytes.
//!
//! Every encoder is total and every decoder is tolerant: characters outside the target alphabet
//! are skipped, and only the final digit count (plus the checksum, for Id26) can fail a decode.
//!
//! | Specifier | [`Format`]                  | Length | Example                                  |
//! | --------- | --------------------------- | ------ | ---------------------------------------- |
//! | `D`, ``   | [`Format::Hyphenated`]      | 36     | `00010203-3435-7677-b8b9-fafbfcfdfeff`   |
//! | `N`       | [`Format::Simple`]          | 32     | `0001020334357677b8b9fafbfcfdfeff`       |
//! | `B`       | [`Format::Braced`]          | 38     | `{00010203-3435-7677-b8b9-fafbfcfdfeff}` |
//! | `P`       | [`Format::Parenthesized`]   | 38     | `(00010203-3435-7677-b8b9-fafbfcfdfeff)` |
//! | `X`       | [`Format::StructLiteral`]   | 68     | `{0x00010203,0x3435,0x7677,{0xb8,...}}`  |
//! | `2`       | [`Format::Id22`]            | 22     | `112drYSDr45nCJ6chixdxJ`                 |
//! | `5`       | [`Format::Id25`]            | 25     | `000jnpiacvek52kvka6to5ogn`              |
//! | `6`       | [`Format::Id26`]            | 26     | `000h40tn6pv7gf5tzcxztzgyzy`             |
//!
//! Specifiers are case-insensitive.

use std::{fmt, str};

use crate::{FormatSpecError, ParseError};

mod alphabet;
mod base_n;
mod hex;
mod id26;

pub(crate) use base_n::{encode_id22, encode_id25};
pub(crate) use hex::{encode_hyphenated, encode_simple};
pub(crate) use id26::encode_id26;

/// Selects one of the textual representations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Format {
    /// 32 hexadecimal digits grouped 8-4-4-4-12 with hyphens (`D`).
    #[default]
    Hyphenated,
    /// 32 hexadecimal digits without separators (`N`).
    Simple,
    /// The hyphenated form enclosed in braces (`B`).
    Braced,
    /// The hyphenated form enclosed in parentheses (`P`).
    Parenthesized,
    /// C struct literal style hexadecimal values (`X`).
    StructLiteral,
    /// 22 base58 digits (`2`).
    Id22,
    /// 25 case-insensitive base35 digits (`5`).
    Id25,
    /// 26 case-insensitive base32 symbols with a 2-bit checksum (`6`).
    Id26,
}

impl Format {
    /// All formats in specifier order.
    pub const ALL: [Self; 8] = [
        Self::Hyphenated,
        Self::Simple,
        Self::Braced,
        Self::Parenthesized,
        Self::StructLiteral,
        Self::Id22,
        Self::Id25,
        Self::Id26,
    ];

    /// Resolves a format specifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_id::Format;
    ///
    /// assert_eq!(Format::from_specifier(""), Ok(Format::Hyphenated));
    /// assert_eq!(Format::from_specifier("n"), Ok(Format::Simple));
    /// assert_eq!(Format::from_specifier("6"), Ok(Format::Id26));
    /// assert!(Format::from_specifier("y").is_err());
    /// ```
    pub fn from_specifier(specifier: &str) -> Result<Self, FormatSpecError> {
        let mut chars = specifier.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Self::Hyphenated),
            (Some(c), None) => Self::try_from(c),
            _ => Err(FormatSpecError(specifier.to_owned())),
        }
    }

    /// Returns the canonical (uppercase) specifier character.
    pub const fn specifier(&self) -> char {
        match self {
            Self::Hyphenated => 'D',
            Self::Simple => 'N',
            Self::Braced => 'B',
            Self::Parenthesized => 'P',
            Self::StructLiteral => 'X',
            Self::Id22 => '2',
            Self::Id25 => '5',
            Self::Id26 => '6',
        }
    }

    /// Returns the length of the encoded text.
    pub const fn encoded_len(&self) -> usize {
        match self {
            Self::Hyphenated => 36,
            Self::Simple => 32,
            Self::Braced | Self::Parenthesized => 38,
            Self::StructLiteral => 68,
            Self::Id22 => 22,
            Self::Id25 => 25,
            Self::Id26 => 26,
        }
    }
}

impl TryFrom<char> for Format {
    type Error = FormatSpecError;

    fn try_from(src: char) -> Result<Self, Self::Error> {
        match src.to_ascii_uppercase() {
            'D' => Ok(Self::Hyphenated),
            'N' => Ok(Self::Simple),
            'B' => Ok(Self::Braced),
            'P' => Ok(Self::Parenthesized),
            'X' => Ok(Self::StructLiteral),
            '2' => Ok(Self::Id22),
            '5' => Ok(Self::Id25),
            '6' => Ok(Self::Id26),
            _ => Err(FormatSpecError(src.to_string())),
        }
    }
}

impl str::FromStr for Format {
    type Err = FormatSpecError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_specifier(src)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hyphenated => "hyphenated",
            Self::Simple => "simple",
            Self::Braced => "braced",
            Self::Parenthesized => "parenthesized",
            Self::StructLiteral => "struct literal",
            Self::Id22 => "Id22",
            Self::Id25 => "Id25",
            Self::Id26 => "Id26",
        })
    }
}

/// Encodes `bytes` in `format`.
///
/// # Examples
///
/// ```rust
/// use uuid7_id::{codec, Format};
///
/// let bytes = [0, 1, 2, 3, 52, 53, 118, 119, 184, 185, 250, 251, 252, 253, 254, 255];
/// assert_eq!(codec::encode(&bytes, Format::Id22), "112drYSDr45nCJ6chixdxJ");
/// ```
pub fn encode(bytes: &[u8; 16], format: Format) -> String {
    fn ascii(buffer: &[u8]) -> String {
        debug_assert!(buffer.is_ascii());
        buffer.iter().map(|&e| e as char).collect()
    }

    match format {
        Format::Hyphenated => ascii(&hex::encode_hyphenated(bytes)),
        Format::Simple => ascii(&hex::encode_simple(bytes)),
        Format::Braced => ascii(&hex::encode_wrapped(bytes, b'{', b'}')),
        Format::Parenthesized => ascii(&hex::encode_wrapped(bytes, b'(', b')')),
        Format::StructLiteral => ascii(&hex::encode_struct_literal(bytes)),
        Format::Id22 => ascii(&base_n::encode_id22(bytes)),
        Format::Id25 => ascii(&base_n::encode_id25(bytes)),
        Format::Id26 => ascii(&id26::encode_id26(bytes)),
    }
}

/// Decodes text in `format` back to 16 bytes.
///
/// The four hyphenated and plain hexadecimal formats share one rule: exactly 32 hexadecimal
/// digits, anything else ignored. The struct literal form additionally drops its `0x` prefixes.
pub fn decode(src: &str, format: Format) -> Result<[u8; 16], ParseError> {
    match format {
        Format::Hyphenated | Format::Simple | Format::Braced | Format::Parenthesized => {
            hex::decode_digits(src, format)
        }
        Format::StructLiteral => hex::decode_struct_literal(src),
        Format::Id22 => base_n::decode_id22(src),
        Format::Id25 => base_n::decode_id25(src),
        Format::Id26 => id26::decode_id26(src),
    }
}

/// Decodes `src` with the format named by a specifier.
pub fn decode_with_specifier(src: &str, specifier: &str) -> Result<[u8; 16], ParseError> {
    decode(src, Format::from_specifier(specifier)?)
}

/// Encodes `bytes` with the format named by a specifier.
pub fn encode_with_specifier(bytes: &[u8; 16], specifier: &str) -> Result<String, FormatSpecError> {
    Ok(encode(bytes, Format::from_specifier(specifier)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BYTES: [u8; 16] = [
        0, 1, 2, 3, 52, 53, 118, 119, 184, 185, 250, 251, 252, 253, 254, 255,
    ];

    /// Formats prepared case with every specifier
    #[test]
    fn formats_prepared_case_with_every_specifier() {
        let cases = [
            ("", "00010203-3435-7677-b8b9-fafbfcfdfeff"),
            ("D", "00010203-3435-7677-b8b9-fafbfcfdfeff"),
            ("d", "00010203-3435-7677-b8b9-fafbfcfdfeff"),
            ("N", "0001020334357677b8b9fafbfcfdfeff"),
            ("n", "0001020334357677b8b9fafbfcfdfeff"),
            ("B", "{00010203-3435-7677-b8b9-fafbfcfdfeff}"),
            ("b", "{00010203-3435-7677-b8b9-fafbfcfdfeff}"),
            ("P", "(00010203-3435-7677-b8b9-fafbfcfdfeff)"),
            ("p", "(00010203-3435-7677-b8b9-fafbfcfdfeff)"),
            (
                "X",
                "{0x00010203,0x3435,0x7677,{0xb8,0xb9,0xfa,0xfb,0xfc,0xfd,0xfe,0xff}}",
            ),
            (
                "x",
                "{0x00010203,0x3435,0x7677,{0xb8,0xb9,0xfa,0xfb,0xfc,0xfd,0xfe,0xff}}",
            ),
            ("2", "112drYSDr45nCJ6chixdxJ"),
            ("5", "000jnpiacvek52kvka6to5ogn"),
            ("6", "000h40tn6pv7gf5tzcxztzgyzy"),
        ];

        for (specifier, text) in cases {
            assert_eq!(encode_with_specifier(&BYTES, specifier).unwrap(), text);
            assert_eq!(decode_with_specifier(text, specifier), Ok(BYTES));
        }
    }

    /// Rejects unrecognized specifiers
    #[test]
    fn rejects_unrecognized_specifiers() {
        for e in ["y", "DD", "22", "-", " ", "é"] {
            let err = encode_with_specifier(&BYTES, e).unwrap_err();
            assert_eq!(err.specifier(), e);
            assert_eq!(
                decode_with_specifier("00010203-3435-7677-b8b9-fafbfcfdfeff", e),
                Err(ParseError::UnknownSpecifier(err))
            );
        }
    }

    /// Round-trips boundary and mixed values in every format
    #[test]
    fn round_trips_boundary_and_mixed_values_in_every_format() {
        let values = [
            [0x00; 16],
            [0xff; 16],
            BYTES,
            [
                0x01, 0x8c, 0x05, 0x1e, 0xb8, 0x7a, 0x74, 0x04, 0xae, 0x7f, 0x50, 0xe3, 0xbe, 0x71,
                0x11, 0x02,
            ],
            [0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x80],
        ];

        for value in values {
            for format in Format::ALL {
                let text = encode(&value, format);
                assert_eq!(text.len(), format.encoded_len(), "{format}");
                assert_eq!(decode(&text, format), Ok(value), "{format}: {text}");
            }
        }
    }

    /// Round-trips generated identifiers in every format
    #[test]
    fn round_trips_generated_identifiers_in_every_format() {
        let mut values = vec![crate::Uuid7::NIL; 4_000];
        crate::fill(&mut values[..2_000]);
        crate::fill_v4(&mut values[2_000..]);

        for value in values {
            let bytes = value.as_bytes();
            for format in Format::ALL {
                let text = encode(bytes, format);
                assert_eq!(text.len(), format.encoded_len(), "{format}");
                assert_eq!(decode(&text, format).as_ref(), Ok(bytes), "{format}: {text}");
            }
        }
    }

    /// Preserves sort order in hexadecimal and fixed-width forms
    #[test]
    fn preserves_sort_order_in_hexadecimal_and_fixed_width_forms() {
        let mut values: Vec<[u8; 16]> = (0..=255u8)
            .map(|i| {
                let mut e = [i.rotate_left(3); 16];
                e[15] = i;
                e
            })
            .collect();
        values.sort();

        for format in [Format::Simple, Format::Id22, Format::Id25, Format::Id26] {
            let encoded: Vec<String> = values.iter().map(|e| encode(e, format)).collect();
            assert!(encoded.windows(2).all(|w| w[0] < w[1]), "{format}");
        }
    }
}
