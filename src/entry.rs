//! Default generator and entry point functions

use crate::{GenContext, PerThread, Uuid7};

/// Generates a UUIDv7 object.
///
/// This function employs a thread-local generator and guarantees the per-thread monotonic order of
/// UUIDs. On Unix, this function resets the generator when the process ID changes (i.e. upon
/// process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_id::uuid7();
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid7_id::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid7 {
    PerThread.uuid7()
}

/// Generates a UUIDv7 object from the `unix_ts_ms` passed.
///
/// Identifiers from this function are ordered among themselves per thread, independently of
/// [`uuid7()`].
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_id::uuid7_at(1_700_892_948_602);
/// assert_eq!(uuid.unix_ts_ms(), Some(1_700_892_948_602));
/// ```
pub fn uuid7_at(unix_ts_ms: u64) -> Uuid7 {
    PerThread.uuid7_at(unix_ts_ms)
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_id::uuid4();
/// println!("{uuid}"); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid7 {
    PerThread.uuid4()
}

/// Fills `dest` with increasing UUIDv7 objects using the thread-local generator.
///
/// # Examples
///
/// ```rust
/// use uuid7_id::Uuid7;
///
/// let mut ids = [Uuid7::NIL; 16];
/// uuid7_id::fill(&mut ids);
/// assert!(ids.windows(2).all(|w| w[0] < w[1]));
/// ```
pub fn fill(dest: &mut [Uuid7]) {
    PerThread.fill(dest)
}

/// Fills `dest` with increasing UUIDv7 objects from the `unix_ts_ms` passed.
pub fn fill_at(dest: &mut [Uuid7], unix_ts_ms: u64) {
    PerThread.fill_at(dest, unix_ts_ms)
}

/// Fills `dest` with UUIDv4 objects.
pub fn fill_v4(dest: &mut [Uuid7]) {
    PerThread.fill_v4(dest)
}

/// Generates a time-ordered [`uuid::Uuid`] that Microsoft SQL Server sorts by creation time.
///
/// SQL Server orders `uniqueidentifier` values by their mixed-endian bytes starting from the last
/// six, so the timestamp is placed there instead of at the front. The value is not a valid UUIDv7
/// in the usual big-endian reading.
///
/// # Examples
///
/// ```rust
/// let guid = uuid7_id::uuid7_mssql();
/// println!("{guid}"); // e.g., "9c1a48fb-2c5f-3e7a-8f5b-018c051eb87a"
/// ```
pub fn uuid7_mssql() -> uuid::Uuid {
    PerThread.uuid7_mssql()
}

/// Fills `dest` with time-ordered [`uuid::Uuid`] objects in SQL Server order.
pub fn fill_mssql(dest: &mut [uuid::Uuid]) {
    PerThread.fill_mssql(dest)
}



#[cfg(test)]
mod tests_mssql {
    use super::{fill_mssql, uuid7_mssql};

    /// Returns the bytes in the order Microsoft SQL Server compares `uniqueidentifier` values.
    fn mssql_key(guid: &uuid::Uuid) -> [u8; 16] {
        let b = guid.to_bytes_le();
        let mut key = [0u8; 16];
        for (k, i) in key
            .iter_mut()
            .zip([10, 11, 12, 13, 14, 15, 8, 9, 6, 7, 4, 5, 0, 1, 2, 3])
        {
            *k = b[i];
        }
        key
    }

    /// Generates identifiers sortable by SQL Server
    #[test]
    fn generates_identifiers_sortable_by_sql_server() {
        let mut prev = mssql_key(&uuid7_mssql());
        for _ in 0..100_000 {
            let curr = mssql_key(&uuid7_mssql());
            assert!(prev < curr);
            prev = curr;
        }

        let mut dest = vec![uuid::Uuid::nil(); 10_000];
        fill_mssql(&mut dest);
        assert!(prev < mssql_key(&dest[0]));
        assert!(dest.windows(2).all(|w| mssql_key(&w[0]) < mssql_key(&w[1])));
    }

    /// Embeds up-to-date timestamp in trailing bytes
    #[test]
    fn embeds_up_to_date_timestamp_in_trailing_bytes() {
        use std::time;
        let ts_now = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as i64;
        let mut buffer = [0u8; 8];
        buffer[2..].copy_from_slice(&uuid7_mssql().to_bytes_le()[10..]);
        let timestamp = u64::from_be_bytes(buffer) as i64;
        assert!((ts_now - timestamp).abs() < 16);
    }
}
