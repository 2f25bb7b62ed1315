//! Hexadecimal representations: `D`, `N`, `B`, `P`, and `X`

use std::iter;

use super::{alphabet::HEX, base_n, Format};
use crate::ParseError;

/// Positions after which the hyphenated form inserts a `-`.
const fn is_group_end(i: usize) -> bool {
    i == 3 || i == 5 || i == 7 || i == 9
}

/// Accumulates ASCII output for the fixed-layout encoders.
struct Writer<'a> {
    buffer: &'a mut [u8],
    len: usize,
}

impl<'a> Writer<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, len: 0 }
    }

    fn put(&mut self, text: &[u8]) {
        self.buffer[self.len..self.len + text.len()].copy_from_slice(text);
        self.len += text.len();
    }

    fn put_hex(&mut self, bytes: &[u8]) {
        for &e in bytes {
            self.put(&[HEX.digit((e >> 4) as usize), HEX.digit((e & 15) as usize)]);
        }
    }

    fn finish(self) {
        debug_assert_eq!(self.len, self.buffer.len());
    }
}

/// Encodes to the 8-4-4-4-12 form, e.g. `00010203-3435-7677-b8b9-fafbfcfdfeff`.
pub(crate) fn encode_hyphenated(bytes: &[u8; 16]) -> [u8; 36] {
    let mut buffer = [0u8; 36];
    let mut w = Writer::new(&mut buffer);
    for (i, e) in bytes.iter().enumerate() {
        w.put_hex(&[*e]);
        if is_group_end(i) {
            w.put(b"-");
        }
    }
    w.finish();
    buffer
}

/// Encodes to 32 digits without separators.
pub(crate) fn encode_simple(bytes: &[u8; 16]) -> [u8; 32] {
    let mut buffer = [0u8; 32];
    let mut w = Writer::new(&mut buffer);
    w.put_hex(bytes);
    w.finish();
    buffer
}

/// Encodes to the hyphenated form wrapped in `open` and `close`.
pub(crate) fn encode_wrapped(bytes: &[u8; 16], open: u8, close: u8) -> [u8; 38] {
    let mut buffer = [0u8; 38];
    let mut w = Writer::new(&mut buffer);
    w.put(&[open]);
    w.put(&encode_hyphenated(bytes));
    w.put(&[close]);
    w.finish();
    buffer
}

/// Encodes to the C struct literal form, e.g.
/// `{0x00010203,0x3435,0x7677,{0xb8,0xb9,0xfa,0xfb,0xfc,0xfd,0xfe,0xff}}`.
pub(crate) fn encode_struct_literal(bytes: &[u8; 16]) -> [u8; 68] {
    let mut buffer = [0u8; 68];
    let mut w = Writer::new(&mut buffer);
    w.put(b"{0x");
    w.put_hex(&bytes[..4]);
    w.put(b",0x");
    w.put_hex(&bytes[4..6]);
    w.put(b",0x");
    w.put_hex(&bytes[6..8]);
    w.put(b",{0x");
    w.put_hex(&bytes[8..9]);
    for e in &bytes[9..] {
        w.put(b",0x");
        w.put_hex(&[*e]);
    }
    w.put(b"}}");
    w.finish();
    buffer
}

/// Decodes any text holding exactly 32 hexadecimal digits, ignoring every other character.
///
/// This accepts the `D`, `N`, `B`, and `P` forms as well as arbitrarily punctuated input such as
/// `0001/0203/3435/7677/b8b9/fafb/fcfd/feff`.
pub(crate) fn decode_digits(src: &str, format: Format) -> Result<[u8; 16], ParseError> {
    base_n::decode(&HEX, src.chars(), 32, format)
}

/// Decodes the `X` form. The `0x` prefixes are dropped before the digits are counted.
pub(crate) fn decode_struct_literal(src: &str) -> Result<[u8; 16], ParseError> {
    let mut chars = src.chars().peekable();
    let digits = iter::from_fn(move || loop {
        let c = chars.next()?;
        if c == '0' && matches!(chars.peek(), Some('x' | 'X')) {
            chars.next();
        } else {
            return Some(c);
        }
    });
    base_n::decode(&HEX, digits, 32, Format::StructLiteral)
}
