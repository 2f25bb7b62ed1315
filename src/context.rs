//! Generation contexts.
//!
//! A generation context owns one [`ClockState`](crate::ClockState) and one
//! [`RandomSupply`](crate::RandomSupply) (through a [`V7Generator`]) and decides who may use them:
//!
//! - [`PerThread`] gives every thread its own generator. No locking takes place, identifiers are
//!   strictly increasing within each thread and unique across threads.
//! - [`Shared`] guards a single generator with a mutex. Every call is serialized, and identifiers
//!   are strictly increasing across all threads using the same instance.
//! - [`Global`](crate::Global) is the process-wide [`Shared`]-style context.
//!
//! Code that needs identifiers can take any `impl GenContext` and leave the choice to its caller.

use std::{cell::RefCell, sync};

use rand::{rngs::OsRng, CryptoRng, RngCore};

use crate::{Uuid7, V7Generator};

/// Provides access to the generator of a generation context.
///
/// Only [`with_generator`](GenContext::with_generator) is required; the generation methods are
/// built on top of it.
///
/// # Examples
///
/// ```rust
/// use uuid7_id::{GenContext, PerThread, Shared, Uuid7};
///
/// fn new_ids(ctx: &impl GenContext, n: usize) -> Vec<Uuid7> {
///     let mut ids = vec![Uuid7::NIL; n];
///     ctx.fill(&mut ids);
///     ids
/// }
///
/// assert_eq!(new_ids(&PerThread, 4).len(), 4);
/// assert_eq!(new_ids(&Shared::new(rand::rngs::OsRng), 4).len(), 4);
/// ```
pub trait GenContext {
    /// The random number generator behind the context's [`RandomSupply`](crate::RandomSupply).
    type Rng: RngCore + CryptoRng;

    /// Calls `f` with exclusive access to the context's generator.
    ///
    /// The context stays held while `f` runs, so `f` must not use the same context again. For
    /// [`Shared`] and [`Global`](crate::Global) such a nested call deadlocks on the mutex.
    ///
    /// # Panics
    ///
    /// Panics if `f` uses [`PerThread`] while called on [`PerThread`], since the thread's
    /// generator is already borrowed.
    fn with_generator<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&mut V7Generator<Self::Rng>) -> O;

    /// Generates a UUIDv7 object from the current timestamp.
    fn uuid7(&self) -> Uuid7 {
        self.with_generator(|g| g.generate())
    }

    /// Generates a UUIDv7 object from the `unix_ts_ms` passed.
    fn uuid7_at(&self, unix_ts_ms: u64) -> Uuid7 {
        self.with_generator(|g| g.generate_at(unix_ts_ms))
    }

    /// Generates a UUIDv4 object.
    fn uuid4(&self) -> Uuid7 {
        self.with_generator(|g| g.generate_v4())
    }

    /// Fills `dest` with increasing UUIDv7 objects.
    fn fill(&self, dest: &mut [Uuid7]) {
        self.with_generator(|g| g.fill(dest))
    }

    /// Fills `dest` with increasing UUIDv7 objects from the `unix_ts_ms` passed.
    fn fill_at(&self, dest: &mut [Uuid7], unix_ts_ms: u64) {
        self.with_generator(|g| g.fill_at(dest, unix_ts_ms))
    }

    /// Fills `dest` with UUIDv4 objects.
    fn fill_v4(&self, dest: &mut [Uuid7]) {
        self.with_generator(|g| g.fill_v4(dest))
    }

    /// Generates a time-ordered [`uuid::Uuid`] that Microsoft SQL Server sorts by creation time.
    ///
    /// See [`V7Generator::generate_mssql`].
    fn uuid7_mssql(&self) -> uuid::Uuid {
        self.with_generator(|g| g.generate_mssql())
    }

    /// Fills `dest` with time-ordered [`uuid::Uuid`] objects in SQL Server order.
    fn fill_mssql(&self, dest: &mut [uuid::Uuid]) {
        self.with_generator(|g| g.fill_mssql(dest))
    }
}

thread_local! {
    static PER_THREAD_GENERATOR: RefCell<V7Generator<OsRng>> = RefCell::new(V7Generator::new(OsRng));
}

/// The generation context that gives each thread its own generator.
///
/// The generator is created on first use in each thread and lives as long as the thread. On Unix,
/// it is replaced with a fresh one when the process ID changes (i.e., upon process forks) so that
/// parent and child do not hand out the same buffered random bytes.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct PerThread;

impl GenContext for PerThread {
    type Rng = OsRng;

    fn with_generator<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&mut V7Generator<Self::Rng>) -> O,
    {
        PER_THREAD_GENERATOR.with(|g| {
            if unix_fork_safety::process_id_changed() {
                tracing::debug!("process id changed; resetting per-thread generator");
                *g.borrow_mut() = V7Generator::new(OsRng);
            }
            f(&mut g.borrow_mut())
        })
    }
}

/// The generation context that guards one generator with a mutex.
///
/// All threads using the same instance share a single clock state, so the identifiers are strictly
/// increasing process-wide at the cost of serializing every call. A poisoned lock is ignored.
///
/// # Examples
///
/// ```rust
/// use std::{sync::Arc, thread};
/// use uuid7_id::{GenContext, Shared};
///
/// let ctx = Arc::new(Shared::new(rand::rngs::OsRng));
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let ctx = Arc::clone(&ctx);
///         thread::spawn(move || ctx.uuid7())
///     })
///     .collect();
/// for h in handles {
///     println!("{}", h.join().unwrap());
/// }
/// ```
#[derive(Debug)]
pub struct Shared<R> {
    generator: sync::Mutex<V7Generator<R>>,
}

impl<R: RngCore + CryptoRng> Shared<R> {
    /// Creates a shared context with a specified random number generator and the system clock.
    pub fn new(rng: R) -> Self {
        Self::from_generator(V7Generator::new(rng))
    }

    /// Creates a shared context that guards `generator`.
    pub fn from_generator(generator: V7Generator<R>) -> Self {
        Self {
            generator: sync::Mutex::new(generator),
        }
    }

    /// Consumes the context and returns the generator inside.
    pub fn into_inner(self) -> V7Generator<R> {
        self.generator
            .into_inner()
            .unwrap_or_else(sync::PoisonError::into_inner)
    }
}

impl<R: RngCore + CryptoRng> GenContext for Shared<R> {
    type Rng = R;

    fn with_generator<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&mut V7Generator<Self::Rng>) -> O,
    {
        let mut g = self
            .generator
            .lock()
            .unwrap_or_else(sync::PoisonError::into_inner);
        f(&mut g)
    }
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Returns true if the process ID has changed since the previous call in this thread.
    pub fn process_id_changed() -> bool {
        PID.with(|last_pid| {
            let pid = process::id();
            pid != last_pid.replace(pid)
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn process_id_changed() -> bool {
        false
    }
}
