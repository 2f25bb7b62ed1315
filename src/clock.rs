//! Clock state and UUIDv7 byte assembly.

use rand::{CryptoRng, RngCore};

use crate::{RandomSupply, Uuid7};

/// Tracks the timestamp and counters that keep the identifiers of one generation context in
/// strictly increasing order.
///
/// Three values are kept:
///
/// - `last_millisecond`: the raw timestamp of the previous call. A call with a different raw
///   timestamp, in either direction, starts a new time step.
/// - `millisecond_counter`: the 48-bit timestamp actually embedded. It follows the clock forward
///   but never rewinds; when the clock goes back, it advances by one instead.
/// - `monotonic_counter`: the 26-bit counter embedded after the version nibble. Each time step
///   seeds it with random bits, and each further call in the same step advances it by a random
///   amount between 1 and 16.
///
/// The random increment reduces the chance that two contexts running in the same millisecond
/// produce colliding counter sequences. It also consumes counter space: about 2^22 identifiers
/// fit in one millisecond of one context. Overflowing the counter is not detected, and identifiers
/// generated past that point may repeat or lose their order.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ClockState {
    last_millisecond: Option<u64>,
    millisecond_counter: u64,
    monotonic_counter: u32,
}

impl ClockState {
    /// Creates a clock state that has not seen any timestamp.
    pub const fn new() -> Self {
        Self {
            last_millisecond: None,
            millisecond_counter: 0,
            monotonic_counter: 0,
        }
    }

    /// Returns the raw timestamp of the previous call.
    pub const fn last_millisecond(&self) -> Option<u64> {
        self.last_millisecond
    }

    /// Returns the timestamp embedded by the previous call.
    pub const fn millisecond_counter(&self) -> u64 {
        self.millisecond_counter
    }

    /// Returns the sub-millisecond counter embedded by the previous call.
    pub const fn monotonic_counter(&self) -> u32 {
        self.monotonic_counter
    }

    /// Starts a new time step unless `unix_ts_ms` equals the raw timestamp of the previous call,
    /// returning whether it did.
    fn advance(&mut self, unix_ts_ms: u64) -> bool {
        let last = self.last_millisecond.replace(unix_ts_ms);
        let new_step = last != Some(unix_ts_ms);
        if new_step {
            if last.is_none() || unix_ts_ms > self.millisecond_counter {
                self.millisecond_counter = unix_ts_ms;
            } else {
                tracing::debug!(
                    unix_ts_ms,
                    millisecond_counter = self.millisecond_counter,
                    "clock rollback detected; advancing previous timestamp"
                );
                self.millisecond_counter = self.millisecond_counter.wrapping_add(1);
            }
        }
        new_step
    }

    /// Generates a UUIDv7 for the raw timestamp `unix_ts_ms`, drawing random bytes from `random`.
    ///
    /// Only the low 48 bits of the timestamp are embedded.
    pub fn generate<R: RngCore + CryptoRng>(
        &mut self,
        unix_ts_ms: u64,
        random: &mut RandomSupply<R>,
    ) -> Uuid7 {
        let new_step = self.advance(unix_ts_ms);

        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&self.millisecond_counter.to_be_bytes()[2..]);

        let counter = if new_step {
            random.fill(&mut bytes[6..]);
            // the top bit stays clear to leave room for increments
            ((bytes[6] as u32 & 0x07) << 22)
                | ((bytes[7] as u32) << 14)
                | ((bytes[8] as u32 & 0x3f) << 8)
                | bytes[9] as u32
        } else {
            random.fill(&mut bytes[9..]);
            let counter = self
                .monotonic_counter
                .wrapping_add((bytes[9] >> 4) as u32 + 1);
            bytes[7] = (counter >> 14) as u8;
            bytes[9] = counter as u8;
            counter
        };
        self.monotonic_counter = counter;

        bytes[6] = 0x70 | ((counter >> 22) & 0x0f) as u8;
        bytes[8] = 0x80 | ((counter >> 8) & 0x3f) as u8;
        Uuid7::from(bytes)
    }

    /// Generates an identifier laid out for the `uniqueidentifier` ordering of Microsoft SQL
    /// Server, which compares the bytes of the mixed-endian GUID layout in the order
    /// `10..16, 8, 9, 6, 7, 4, 5, 0..4`.
    ///
    /// The fields are placed in that layout (as returned by [`uuid::Uuid::to_bytes_le`]) so that
    /// the server sorts them by creation time:
    ///
    /// ```text
    ///  0                   1                   2                   3
    ///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |                            random                             |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |            random             |  ver  |     counter[11:0]     |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |var|      counter[25:12]       |       unix_ts_ms[47:32]       |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |                       unix_ts_ms[31:0]                        |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// ```
    ///
    /// The timestamp and counter rules are the same as for [`generate`](Self::generate).
    pub fn generate_mssql<R: RngCore + CryptoRng>(
        &mut self,
        unix_ts_ms: u64,
        random: &mut RandomSupply<R>,
    ) -> uuid::Uuid {
        let new_step = self.advance(unix_ts_ms);

        let mut bytes = [0u8; 16];
        bytes[10..].copy_from_slice(&self.millisecond_counter.to_be_bytes()[2..]);

        let counter = if new_step {
            random.fill(&mut bytes[..10]);
            ((bytes[8] as u32 & 0x1f) << 20)
                | ((bytes[9] as u32) << 12)
                | ((bytes[6] as u32 & 0x0f) << 8)
                | bytes[7] as u32
        } else {
            // byte 7 only supplies the increment before it is overwritten
            random.fill(&mut bytes[..8]);
            let counter = self
                .monotonic_counter
                .wrapping_add((bytes[7] >> 4) as u32 + 1);
            bytes[7] = counter as u8;
            bytes[9] = (counter >> 12) as u8;
            counter
        };
        self.monotonic_counter = counter;

        bytes[6] = 0x70 | ((counter >> 8) & 0x0f) as u8;
        bytes[8] = 0x80 | ((counter >> 20) & 0x3f) as u8;
        uuid::Uuid::from_bytes_le(bytes)
    }
}
