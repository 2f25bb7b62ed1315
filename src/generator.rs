//! UUIDv7 generator and related types.

use rand::{CryptoRng, RngCore};

use crate::{ClockState, RandomSupply, Uuid7};

/// A trait that defines the minimum system clock interface for [`V7Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
///
/// A system clock set before the Unix epoch reads as zero.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Represents a UUIDv7 generator that owns one [`ClockState`] and one [`RandomSupply`] and
/// guarantees the monotonic order of the identifiers it generates.
///
/// A generator is a generation context of its own: identifiers from the same generator are
/// strictly increasing, while identifiers from different generators are only unique. Wrap it in a
/// [`std::sync::Mutex`] (or use [`Shared`](crate::Shared)) to share the order across threads.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuid7_id::V7Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V7Generator::new(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # Generator functions
///
/// | Method             | Timestamp | Ordered with                                   |
/// | ------------------ | --------- | ---------------------------------------------- |
/// | [`generate`]       | Now       | previous `generate` calls                      |
/// | [`generate_at`]    | Argument  | previous `generate_at` calls                   |
/// | [`generate_v4`]    | None      | nothing (UUIDv4, fully random)                 |
/// | [`generate_mssql`] | Now       | previous `generate_mssql` calls, by SQL Server |
///
/// Caller-supplied timestamps drive a separate clock state, so replaying old or future
/// timestamps through [`generate_at`] never shifts the timestamps embedded by [`generate`]. The
/// SQL Server layout keeps a clock state of its own as well.
///
/// [`generate`]: V7Generator::generate
/// [`generate_at`]: V7Generator::generate_at
/// [`generate_v4`]: V7Generator::generate_v4
/// [`generate_mssql`]: V7Generator::generate_mssql
#[derive(Clone, Debug)]
pub struct V7Generator<R, T = StdSystemTime> {
    clock: ClockState,
    pinned: ClockState,
    mssql: ClockState,
    random: RandomSupply<R>,
    time_source: T,
}

impl<R: RngCore + CryptoRng> V7Generator<R> {
    /// Creates a generator object with a specified random number generator and the system clock.
    pub fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R: RngCore + CryptoRng, T: TimeSource> V7Generator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    pub fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        Self {
            clock: ClockState::new(),
            pinned: ClockState::new(),
            mssql: ClockState::new(),
            random: RandomSupply::new(rng),
            time_source,
        }
    }

    /// Generates a new UUIDv7 object from the current timestamp.
    pub fn generate(&mut self) -> Uuid7 {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.clock.generate(unix_ts_ms, &mut self.random)
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// Successive calls are strictly increasing even if `unix_ts_ms` goes backwards; in that case
    /// the previous embedded timestamp is advanced by one.
    pub fn generate_at(&mut self, unix_ts_ms: u64) -> Uuid7 {
        self.pinned.generate(unix_ts_ms, &mut self.random)
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Uuid7 {
        let mut bytes = [0u8; 16];
        self.random.fill(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Uuid7::from(bytes)
    }

    /// Generates a new time-ordered [`uuid::Uuid`] from the current timestamp, laid out so that
    /// Microsoft SQL Server sorts `uniqueidentifier` columns by creation time.
    ///
    /// The result is meant to be stored through the mixed-endian GUID layout
    /// ([`uuid::Uuid::to_bytes_le`]), as database drivers do. See
    /// [`ClockState::generate_mssql`] for the field layout.
    pub fn generate_mssql(&mut self) -> uuid::Uuid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.mssql.generate_mssql(unix_ts_ms, &mut self.random)
    }

    /// Fills `dest` with objects from [`generate_mssql`](Self::generate_mssql) sharing one reading
    /// of the clock.
    pub fn fill_mssql(&mut self, dest: &mut [uuid::Uuid]) {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        for e in dest {
            *e = self.mssql.generate_mssql(unix_ts_ms, &mut self.random);
        }
    }

    /// Fills `dest` with increasing UUIDv7 objects sharing one reading of the clock.
    pub fn fill(&mut self, dest: &mut [Uuid7]) {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        for e in dest {
            *e = self.clock.generate(unix_ts_ms, &mut self.random);
        }
    }

    /// Fills `dest` with increasing UUIDv7 objects from the `unix_ts_ms` passed.
    pub fn fill_at(&mut self, dest: &mut [Uuid7], unix_ts_ms: u64) {
        for e in dest {
            *e = self.pinned.generate(unix_ts_ms, &mut self.random);
        }
    }

    /// Fills `dest` with UUIDv4 objects.
    pub fn fill_v4(&mut self, dest: &mut [Uuid7]) {
        for e in dest {
            *e = self.generate_v4();
        }
    }

    /// Returns the clock state behind [`generate`](Self::generate).
    pub fn clock(&self) -> &ClockState {
        &self.clock
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid7_id::V7Generator;
///
/// V7Generator::new(rand::rngs::OsRng)
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RngCore + CryptoRng, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid7;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RngCore + CryptoRng, T: TimeSource> std::iter::FusedIterator for V7Generator<R, T> {}

#[cfg(test)]
mod tests {
    use super::{StdSystemTime, TimeSource, V7Generator};
    use crate::{Uuid7, Variant};
    use rand::rngs::OsRng;

    /// Replays a fixed list of timestamps, repeating the last one.
    struct MockTimeSource(Vec<u64>);

    impl TimeSource for MockTimeSource {
        fn unix_ts_ms(&mut self) -> u64 {
            if self.0.len() > 1 {
                self.0.remove(0)
            } else {
                self.0[0]
            }
        }
    }

    const TS: u64 = 0x0123_4567_89ab;

    /// Generates increasing identifiers even with decreasing or constant timestamp
    #[test]
    fn generates_increasing_identifiers_even_with_decreasing_or_constant_timestamp() {
        let times = (0..10_000u64).map(|i| TS - (i / 4).min(2_000)).collect();
        let mut g = V7Generator::with_rand_and_time_sources(OsRng, MockTimeSource(times));
        let mut prev = g.generate();
        assert_eq!(prev.unix_ts_ms(), Some(TS));
        for _ in 0..20_000 {
            let curr = g.generate();
            assert!(prev < curr);
            prev = curr;
        }
        assert!(prev.unix_ts_ms() >= Some(TS));
    }

    /// Keeps caller timestamps apart from system clock
    #[test]
    fn keeps_caller_timestamps_apart_from_system_clock() {
        let mut g = V7Generator::with_rand_and_time_sources(OsRng, MockTimeSource(vec![TS]));
        let a = g.generate();
        let past = g.generate_at(1_000);
        let b = g.generate();
        assert_eq!(past.unix_ts_ms(), Some(1_000));
        assert_eq!(b.unix_ts_ms(), Some(TS));
        assert!(a < b);

        let future = g.generate_at(TS + 50_000);
        let c = g.generate();
        assert_eq!(future.unix_ts_ms(), Some(TS + 50_000));
        assert_eq!(c.unix_ts_ms(), Some(TS));
        assert!(b < c);
        assert_eq!(g.clock().last_millisecond(), Some(TS));
    }

    /// Generates increasing identifiers at caller timestamps
    #[test]
    fn generates_increasing_identifiers_at_caller_timestamps() {
        let mut g = V7Generator::new(OsRng);
        let mut prev = g.generate_at(TS);
        for i in 0..10_000u64 {
            let curr = g.generate_at(TS + 5 - i % 10);
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Fills slices in increasing order
    #[test]
    fn fills_slices_in_increasing_order() {
        let mut g = V7Generator::with_rand_and_time_sources(OsRng, MockTimeSource(vec![TS]));
        let mut dest = [Uuid7::NIL; 1_000];
        g.fill(&mut dest);
        assert!(dest.windows(2).all(|w| w[0] < w[1]));
        assert!(dest.iter().all(|e| e.unix_ts_ms() == Some(TS)));

        let mut pinned = [Uuid7::NIL; 1_000];
        g.fill_at(&mut pinned, 42);
        assert!(pinned.windows(2).all(|w| w[0] < w[1]));
        assert!(pinned.iter().all(|e| e.unix_ts_ms() == Some(42)));

        let mut random = [Uuid7::NIL; 1_000];
        g.fill_v4(&mut random);
        assert!(random.iter().all(|e| e.version() == Some(4)));
        assert!(random.iter().all(|e| e.variant() == Variant::Var10));
    }

    /// Generates SQL Server identifiers apart from standard clock
    #[test]
    fn generates_sql_server_identifiers_apart_from_standard_clock() {
        // SQL Server compares the mixed-endian bytes in this order
        fn mssql_key(guid: &uuid::Uuid) -> Vec<u8> {
            let b = guid.to_bytes_le();
            [10, 11, 12, 13, 14, 15, 8, 9, 6, 7, 4, 5, 0, 1, 2, 3]
                .iter()
                .map(|&i| b[i])
                .collect()
        }

        let times = vec![TS, TS, TS - 3, TS + 1];
        let mut g = V7Generator::with_rand_and_time_sources(OsRng, MockTimeSource(times));
        let a = g.generate_mssql();
        let b = g.generate_mssql();
        let c = g.generate_mssql();
        assert!(mssql_key(&a) < mssql_key(&b));
        assert!(mssql_key(&b) < mssql_key(&c));
        assert_eq!(c.to_bytes_le()[10..], (TS + 1).to_be_bytes()[2..]);
        assert!(g.clock().last_millisecond().is_none());

        let mut dest = [uuid::Uuid::nil(); 1_000];
        g.fill_mssql(&mut dest);
        let keys: Vec<Vec<u8>> = dest.iter().map(mssql_key).collect();
        assert!(mssql_key(&c) < keys[0]);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        // the clock reads TS + 1 again, which has not caught up with the advanced timestamp
        assert!(dest
            .iter()
            .all(|e| e.to_bytes_le()[10..] == (TS + 2).to_be_bytes()[2..]));
    }

    /// Fills empty slice without error
    #[test]
    fn fills_empty_slice_without_error() {
        let mut g = V7Generator::new(OsRng);
        g.fill(&mut []);
        g.fill_at(&mut [], TS);
        g.fill_v4(&mut []);
        g.fill_mssql(&mut []);
    }

    /// Works as infinite iterator
    #[test]
    fn works_as_infinite_iterator() {
        let g = V7Generator::new(OsRng);
        assert_eq!(g.size_hint(), (usize::MAX, None));
        let v: Vec<Uuid7> = g.take(1_000).collect();
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    /// Reads up-to-date system time
    #[test]
    fn reads_up_to_date_system_time() {
        use std::time;
        let ts_now = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64;
        let ts = StdSystemTime.unix_ts_ms();
        assert!(ts >= ts_now && ts - ts_now < 16);
    }
}
