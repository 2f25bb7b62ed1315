use std::{fmt, str, time};

use fstr::FStr;

use crate::{
    codec::{self, Format},
    ByteLengthError, FormatSpecError, ParseError,
};

/// Represents a UUID version 7 identifier as 16 big-endian bytes.
///
/// The type can hold any 128-bit value, so it doubles as a container for UUIDv4 values and for
/// identifiers parsed from text. Ordering is the unsigned order of the bytes, which for UUIDv7
/// is the order of creation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Uuid7([u8; 16]);

/// The variant field of a UUID, including the two special values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Nil UUID (`00000000-0000-0000-0000-000000000000`).
    VarNil,
    /// The variant field value `0xxx`, reserved for NCS backward compatibility.
    Var0,
    /// The variant field value `10xx`, used by RFC 9562, including UUIDv7 and UUIDv4.
    Var10,
    /// The variant field value `110x`, reserved for Microsoft backward compatibility.
    Var110,
    /// The variant field value `111x`, reserved for future definition.
    VarReserved,
    /// Max UUID (`ffffffff-ffff-ffff-ffff-ffffffffffff`).
    VarMax,
}

impl Uuid7 {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// The smallest value, identical to [`Uuid7::NIL`].
    pub const MIN: Self = Self::NIL;

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates an object from a byte slice that must be exactly 16 bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_id::Uuid7;
    ///
    /// assert_eq!(Uuid7::from_slice(&[0u8; 16]), Ok(Uuid7::NIL));
    /// assert_eq!(Uuid7::from_slice(&[0u8; 15]).unwrap_err().found(), 15);
    /// ```
    pub fn from_slice(src: &[u8]) -> Result<Self, ByteLengthError> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| ByteLengthError(src.len()))
    }

    /// Copies the 16 bytes to the beginning of `dest`, returning `false` without writing anything
    /// if `dest` is shorter than 16 bytes.
    pub fn write_bytes(&self, dest: &mut [u8]) -> bool {
        match dest.get_mut(..16) {
            Some(head) => {
                head.copy_from_slice(&self.0);
                true
            }
            None => false,
        }
    }

    /// Returns the bytes in the mixed-endian GUID layout, where the first three fields are
    /// little-endian.
    pub const fn to_bytes_le(&self) -> [u8; 16] {
        let b = &self.0;
        [
            b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
            b[14], b[15],
        ]
    }

    /// Creates an object from bytes in the mixed-endian GUID layout.
    pub const fn from_bytes_le(b: [u8; 16]) -> Self {
        Self([
            b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
            b[14], b[15],
        ])
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    pub fn variant(&self) -> Variant {
        if self.0 == Self::NIL.0 {
            return Variant::VarNil;
        } else if self.0 == Self::MAX.0 {
            return Variant::VarMax;
        }

        match self.0[8] >> 4 {
            0..=7 => Variant::Var0,
            8..=0xb => Variant::Var10,
            0xc | 0xd => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `10`.
    pub fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the embedded Unix timestamp in milliseconds, or `None` unless this is a UUIDv7.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_id::Uuid7;
    ///
    /// let x: Uuid7 = "018c051e-b87a-7404-ae7f-50e3be711102".parse()?;
    /// assert_eq!(x.unix_ts_ms(), Some(1_700_892_948_602));
    ///
    /// let y: Uuid7 = "018c051e-b87a-6404-ae7f-50e3be711102".parse()?;
    /// assert_eq!(y.unix_ts_ms(), None);
    /// # Ok::<(), uuid7_id::ParseError>(())
    /// ```
    pub fn unix_ts_ms(&self) -> Option<u64> {
        let mut buffer = [0u8; 8];
        buffer[2..].copy_from_slice(&self.0[..6]);
        (self.version() == Some(7)).then(|| u64::from_be_bytes(buffer))
    }

    /// Returns the embedded timestamp as [`SystemTime`](time::SystemTime), or `None` unless this
    /// is a UUIDv7.
    pub fn to_system_time(&self) -> Option<time::SystemTime> {
        self.unix_ts_ms()
            .and_then(|e| time::UNIX_EPOCH.checked_add(time::Duration::from_millis(e)))
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_id::Uuid7;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid7>()?;
    /// let y = x.encode();
    /// assert_eq!(y.as_str(), "01809424-3e59-7c05-9219-566f82fff672");
    /// assert_eq!(format!("{}", y), "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuid7_id::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        ascii_to_fstr(codec::encode_hyphenated(&self.0))
    }

    /// Returns the 32-digit hexadecimal representation without hyphens.
    pub fn encode_simple(&self) -> FStr<32> {
        ascii_to_fstr(codec::encode_simple(&self.0))
    }

    /// Returns the 22-character base58 representation (Id22).
    pub fn to_id22(&self) -> FStr<22> {
        ascii_to_fstr(codec::encode_id22(&self.0))
    }

    /// Returns the 25-character case-insensitive base35 representation (Id25).
    pub fn to_id25(&self) -> FStr<25> {
        ascii_to_fstr(codec::encode_id25(&self.0))
    }

    /// Returns the 26-character base32 representation with a checksum (Id26).
    pub fn to_id26(&self) -> FStr<26> {
        ascii_to_fstr(codec::encode_id26(&self.0))
    }

    /// Returns the string representation in `format`.
    pub fn to_formatted(&self, format: Format) -> String {
        codec::encode(&self.0, format)
    }

    /// Returns the string representation named by a format specifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_id::Uuid7;
    ///
    /// let x = Uuid7::from([0, 1, 2, 3, 52, 53, 118, 119, 184, 185, 250, 251, 252, 253, 254, 255]);
    /// assert_eq!(x.to_formatted_with("B")?, "{00010203-3435-7677-b8b9-fafbfcfdfeff}");
    /// assert_eq!(x.to_formatted_with("2")?, "112drYSDr45nCJ6chixdxJ");
    /// assert!(x.to_formatted_with("Q").is_err());
    /// # Ok::<(), uuid7_id::FormatSpecError>(())
    /// ```
    pub fn to_formatted_with(&self, specifier: &str) -> Result<String, FormatSpecError> {
        codec::encode_with_specifier(&self.0, specifier)
    }

    /// Creates an object from the string representation in `format`.
    pub fn parse_as(src: &str, format: Format) -> Result<Self, ParseError> {
        codec::decode(src, format).map(Self)
    }

    /// Creates an object from the string representation named by a format specifier.
    pub fn parse_with(src: &str, specifier: &str) -> Result<Self, ParseError> {
        codec::decode_with_specifier(src, specifier).map(Self)
    }

    /// Creates an object from the Id22 representation.
    pub fn from_id22(src: &str) -> Result<Self, ParseError> {
        Self::parse_as(src, Format::Id22)
    }

    /// Creates an object from the Id25 representation.
    pub fn from_id25(src: &str) -> Result<Self, ParseError> {
        Self::parse_as(src, Format::Id25)
    }

    /// Creates an object from the Id26 representation.
    ///
    /// A checksum mismatch still carries the decoded value:
    ///
    /// ```rust
    /// use uuid7_id::{ParseError, Uuid7};
    ///
    /// match Uuid7::from_id26("000h40tn6pv7gf5tzcxztzgyzz") {
    ///     Err(ParseError::ChecksumMismatch { decoded }) => {
    ///         assert_eq!(decoded.to_id26().as_str(), "000h40tn6pv7gf5tzcxztzgyzy");
    ///     }
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn from_id26(src: &str) -> Result<Self, ParseError> {
        Self::parse_as(src, Format::Id26)
    }
}

/// Wraps ASCII bytes produced by the codec.
fn ascii_to_fstr<const N: usize>(buffer: [u8; N]) -> FStr<N> {
    debug_assert!(buffer.is_ascii());
    // SAFETY: every encoder emits ASCII only
    unsafe { FStr::from_bytes_unchecked(buffer) }
}

impl fmt::Display for Uuid7 {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid7 {
    type Err = ParseError;

    /// Creates an object from text containing exactly 32 hexadecimal digits, ignoring every other
    /// character. This accepts the hyphenated, simple, braced, and parenthesized forms.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_as(src, Format::Hyphenated)
    }
}

impl From<Uuid7> for [u8; 16] {
    fn from(src: Uuid7) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid7 {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid7 {
    type Error = ByteLengthError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl TryFrom<Vec<u8>> for Uuid7 {
    type Error = ByteLengthError;

    fn try_from(src: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_slice(&src)
    }
}

impl AsRef<[u8]> for Uuid7 {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid7> for u128 {
    fn from(src: Uuid7) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid7 {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid7> for String {
    fn from(src: Uuid7) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid7 {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl From<Uuid7> for uuid::Uuid {
    fn from(src: Uuid7) -> Self {
        uuid::Uuid::from_bytes(src.0)
    }
}

impl From<uuid::Uuid> for Uuid7 {
    fn from(src: uuid::Uuid) -> Self {
        Self(src.into_bytes())
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid7};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid7 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid7 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Uuid7;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid7::from_slice(value).map_err(de::Error::custom)
        }
    }

}
