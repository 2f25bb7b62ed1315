//! Id26: sortable base32 with an embedded 2-bit checksum
//!
//! The 16 bytes are bit-packed five bits per symbol, most significant first. The 130 bits of 26
//! symbols leave two trailing bits, which carry a modulo-2 Fletcher checksum of the bytes:
//! `sum1` starts at one and accumulates every byte, `sum2` accumulates every intermediate `sum1`,
//! and the checksum is `(sum1 % 2) << 1 | (sum2 % 2)`.
//!
//! Unlike Id22 and Id25 this is not a positional number, but since the bits are emitted in order
//! with an order-preserving alphabet, Id26 strings still sort like the underlying bytes.

use super::{alphabet::BASE32, Format};
use crate::{ParseError, Uuid7};

/// Running modulo-2 Fletcher checksum.
#[derive(Copy, Clone, Debug)]
struct Checksum {
    sum1: u32,
    sum2: u32,
}

impl Checksum {
    const fn new() -> Self {
        Self { sum1: 1, sum2: 0 }
    }

    fn push(&mut self, byte: u8) {
        self.sum1 = self.sum1.wrapping_add(byte as u32);
        self.sum2 = self.sum2.wrapping_add(self.sum1);
    }

    /// Returns the two checksum bits.
    const fn value(&self) -> u8 {
        (((self.sum1 % 2) << 1) | (self.sum2 % 2)) as u8
    }
}

/// Encodes to the 26-character Id26 form.
pub(crate) fn encode_id26(bytes: &[u8; 16]) -> [u8; 26] {
    let mut checksum = Checksum::new();
    let mut source = bytes.iter();
    let mut reservoir = 0u32;
    let mut level = 0;

    let mut buffer = [0u8; 26];
    for e in buffer.iter_mut() {
        if level < 5 {
            let data = match source.next() {
                Some(&byte) => {
                    checksum.push(byte);
                    byte
                }
                // the checksum takes the top two bits of a virtual 17th byte
                None => checksum.value() << 6,
            };
            reservoir = (reservoir << 8) | data as u32;
            level += 8;
        }
        level -= 5;
        *e = BASE32.digit(((reservoir >> level) & 0b11111) as usize);
    }
    buffer
}

/// Decodes the Id26 form, skipping characters outside the alphabet.
///
/// A wrong number of symbols is reported first. If the count is right but the checksum is not,
/// the decoded value is returned inside [`ParseError::ChecksumMismatch`].
pub(crate) fn decode_id26(src: &str) -> Result<[u8; 16], ParseError> {
    let mut buffer = [0u8; 16];
    let mut written = 0;
    let mut checksum = Checksum::new();
    let mut checksum_matches = false;
    let mut reservoir = 0u32;
    let mut level = 0;
    let mut found = 0;

    for value in src.chars().filter_map(|c| BASE32.value_of(c)) {
        found += 1;
        reservoir = (reservoir << 5) | value as u32;
        level += 5;
        if level >= 8 {
            level -= 8;
            if written < buffer.len() {
                let data = (reservoir >> level) as u8;
                buffer[written] = data;
                written += 1;
                checksum.push(data);
                if written == buffer.len() {
                    checksum_matches = (reservoir & 0b11) as u8 == checksum.value();
                }
            }
        }
    }

    if found != 26 {
        Err(ParseError::InvalidLength {
            format: Format::Id26,
            expected: 26,
            found,
        })
    } else if !checksum_matches {
        Err(ParseError::ChecksumMismatch {
            decoded: Uuid7::from(buffer),
        })
    } else {
        Ok(buffer)
    }
}
