//! Buffered supply of cryptographically secure random bytes.

use rand::{CryptoRng, RngCore};

/// Size of the internal buffer in bytes.
const BUFFER_SIZE: usize = 2048;

/// Hands out cryptographically secure random bytes from a buffer that is refilled in bulk.
///
/// Each identifier consumes 7 to 16 bytes, so drawing them from a 2 KiB buffer saves one call into
/// the underlying generator per identifier. When a request does not fit in the unread remainder,
/// the remainder is discarded and the whole buffer is refilled. Requests larger than the buffer
/// bypass it.
///
/// The generator type must be a [`CryptoRng`]; identifiers rely on unpredictable bits for
/// uniqueness across threads and processes.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use uuid7_id::RandomSupply;
///
/// let mut random = RandomSupply::new(OsRng);
/// let mut dest = [0u8; 10];
/// random.fill(&mut dest);
/// ```
#[derive(Clone)]
pub struct RandomSupply<R> {
    buffer: Box<[u8; BUFFER_SIZE]>,
    cursor: usize,
    rng: R,
}

impl<R: RngCore + CryptoRng> RandomSupply<R> {
    /// Creates an empty supply that is filled upon the first request.
    pub fn new(rng: R) -> Self {
        Self {
            buffer: Box::new([0u8; BUFFER_SIZE]),
            cursor: BUFFER_SIZE,
            rng,
        }
    }

    /// Fills `dest` with random bytes.
    pub fn fill(&mut self, dest: &mut [u8]) {
        if dest.len() > BUFFER_SIZE {
            self.rng.fill_bytes(dest);
            return;
        }

        if dest.len() > BUFFER_SIZE - self.cursor {
            tracing::trace!(discarded = BUFFER_SIZE - self.cursor, "refilling random buffer");
            self.rng.fill_bytes(&mut self.buffer[..]);
            self.cursor = 0;
        }

        let end = self.cursor + dest.len();
        dest.copy_from_slice(&self.buffer[self.cursor..end]);
        self.cursor = end;
    }

    /// Returns the number of buffered bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        BUFFER_SIZE - self.cursor
    }
}

impl<R> std::fmt::Debug for RandomSupply<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSupply")
            .field("remaining", &(BUFFER_SIZE - self.cursor))
            .finish_non_exhaustive()
    }
}
