//! Time-ordered UUID version 7 identifiers with compact text encodings
//!
//! ```rust
//! use uuid7_id::uuid7;
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "018c051e-b87a-7404-ae7f-50e3be711102"
//! println!("{}", uuid.to_id22()); // e.g. "1BrqNwBSVuUk3jJrGHQsLa"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                       unix_ts_ms[47:16]                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       unix_ts_ms[15:0]        |  ver  |    counter[25:14]     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|       counter[13:0]       |            random             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds. It never goes backwards within a generation context: if the
//!   system clock is set back, the previous value is advanced by one instead.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 26-bit `counter` field ensures the monotonic order of IDs generated
//!   within the same millisecond. It is initialized with 25 random bits whenever
//!   the timestamp changes and is incremented by a random amount between 1 and 16
//!   for each further ID.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 48 `random` bits are filled with a cryptographically strong
//!   random number for every ID.
//!
//! More than about four million IDs per millisecond in one generation context
//! overflow the counter. This is not detected; the order and uniqueness of such
//! IDs are not guaranteed.
//!
//! # Generation contexts
//!
//! Each generation context owns its own clock state and random buffer:
//!
//! - [`uuid7()`] and the other free functions use [`PerThread`], which keeps a
//!   generator per thread and needs no locking.
//! - [`Shared`] and [`Global`] serialize callers through a mutex and order IDs
//!   across threads.
//! - [`V7Generator`] can be used directly with a custom random number generator
//!   or [`TimeSource`].
//!
//! # Text encodings
//!
//! Besides the canonical hyphenated form, identifiers can be written in four
//! other hexadecimal layouts and three short forms. See [`Format`]:
//!
//! ```rust
//! use uuid7_id::{Format, Uuid7};
//!
//! let x: Uuid7 = "00010203-3435-7677-b8b9-fafbfcfdfeff".parse()?;
//! assert_eq!(x.to_id22().as_str(), "112drYSDr45nCJ6chixdxJ");
//! assert_eq!(x.to_id25().as_str(), "000jnpiacvek52kvka6to5ogn");
//! assert_eq!(x.to_id26().as_str(), "000h40tn6pv7gf5tzcxztzgyzy");
//! assert_eq!(Uuid7::parse_as("000h40tn6pv7gf5tzcxztzgyzy", Format::Id26)?, x);
//! # Ok::<(), uuid7_id::ParseError>(())
//! ```
//!
//! # Other features
//!
//! This library also supports the generation of UUID version 4:
//!
//! ```rust
//! use uuid7_id::uuid4;
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! ```
//!
//! For Microsoft SQL Server, [`uuid7_mssql()`] generates [`uuid::Uuid`] values whose fields are
//! rearranged so that `uniqueidentifier` columns sort by creation time.
//!
//! # Crate features
//!
//! - `serde` enables the serialization and deserialization of [`Uuid7`] objects:
//!   the hyphenated string for human-readable formats, 16 bytes otherwise.
//!
//! Generation events (clock rollbacks, fork resets, random buffer refills) are
//! emitted through [`tracing`] at `debug` and `trace` levels.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{Uuid7, Variant};

mod cmp;

mod error;
pub use error::{ByteLengthError, FormatSpecError, ParseError};

pub mod codec;
pub use codec::Format;

mod random;
pub use random::RandomSupply;

mod clock;
pub use clock::ClockState;

pub mod generator;
pub use generator::{StdSystemTime, TimeSource, V7Generator};

mod context;
pub use context::{GenContext, PerThread, Shared};

mod entry;
pub use entry::{fill, fill_at, fill_mssql, fill_v4, uuid4, uuid7, uuid7_at, uuid7_mssql};

mod global_gen;
pub use global_gen::Global;
