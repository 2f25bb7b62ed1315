//! Digit alphabets shared by the encoders and decoders

/// Marks a byte that does not belong to an alphabet.
const INVALID: u8 = u8::MAX;

/// An `N`-symbol digit alphabet together with its ASCII reverse lookup table.
pub(crate) struct Alphabet<const N: usize> {
    digits: &'static [u8; N],
    values: [u8; 128],
}

impl<const N: usize> Alphabet<N> {
    const fn new(digits: &'static [u8; N], case_insensitive: bool) -> Self {
        let mut values = [INVALID; 128];
        let mut i = 0;
        while i < N {
            let c = digits[i];
            values[c as usize] = i as u8;
            if case_insensitive && c.is_ascii_lowercase() {
                values[c.to_ascii_uppercase() as usize] = i as u8;
            }
            i += 1;
        }
        Self { digits, values }
    }

    /// Returns the symbol for a digit value less than `N`.
    pub fn digit(&self, value: usize) -> u8 {
        self.digits[value]
    }

    /// Returns the digit value of `c`, or `None` if `c` is not part of the alphabet.
    pub fn value_of(&self, c: char) -> Option<u8> {
        if c.is_ascii() {
            match self.values[c as usize] {
                INVALID => None,
                v => Some(v),
            }
        } else {
            None
        }
    }

    /// Returns the number of symbols.
    pub const fn radix(&self) -> u32 {
        N as u32
    }
}

/// Lowercase hexadecimal digits; decoding is case-insensitive.
pub(crate) static HEX: Alphabet<16> = Alphabet::new(b"0123456789abcdef", true);

/// Bitcoin-style base58 alphabet (no `0`, `O`, `I` and `l`); decoding is case-sensitive.
pub(crate) static BASE58: Alphabet<58> = Alphabet::new(
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz",
    false,
);

/// Lowercase alphanumerics without `l`; decoding is case-insensitive.
pub(crate) static BASE35: Alphabet<35> =
    Alphabet::new(b"0123456789abcdefghijkmnopqrstuvwxyz", true);

/// Sortable base32 alphabet (no `a`, `i`, `l` and `o`); decoding is case-insensitive.
pub(crate) static BASE32: Alphabet<32> = Alphabet::new(b"0123456789bcdefghjkmnpqrstuvwxyz", true);
