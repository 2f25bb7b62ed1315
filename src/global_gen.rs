//! Process-wide generation context.

use std::sync;

use crate::{GenContext, V7Generator};
use inner::{GlobalGenInner, GlobalGenRng};

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// The process-wide generation context.
///
/// Every thread using `Global` shares one mutex-guarded generator, so identifiers are strictly
/// increasing across the whole process. On Unix, the generator is reset when the process ID
/// changes (i.e., upon process forks) to prevent collisions across processes.
///
/// Prefer [`PerThread`](crate::PerThread) (used by [`uuid7()`](crate::uuid7)) unless the
/// process-wide order matters.
///
/// # Examples
///
/// ```rust
/// use uuid7_id::{GenContext, Global};
///
/// let uuid = Global.uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct Global;

impl GenContext for Global {
    type Rng = GlobalGenRng;

    fn with_generator<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&mut V7Generator<Self::Rng>) -> O,
    {
        f(lock_global_gen().get_mut())
    }
}

mod inner {
    use rand::{
        rngs::{adapter::ReseedingRng, OsRng},
        SeedableRng,
    };
    use rand_chacha::ChaCha12Core;

    use crate::V7Generator;

    /// The random number generator of the global generator.
    ///
    /// The global generator employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the
    /// strategy used by [`rand::rngs::ThreadRng`].
    pub type GlobalGenRng = ReseedingRng<ChaCha12Core, OsRng>;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V7Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V7Generator::new(ReseedingRng::new(
                    ChaCha12Core::from_entropy(),
                    1024 * 64,
                    OsRng,
                )),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V7Generator`] instance, resetting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V7Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!("process id changed; resetting global generator");
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Global;
    use crate::{GenContext, Uuid7, Variant};

    /// Generates increasing identifiers from any thread
    #[test]
    fn generates_increasing_identifiers_from_any_thread() {
        use std::{sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::spawn(move || {
                for _ in 0..10_000 {
                    tx.send(Global.uuid7()).unwrap();
                }
            });
        }
        drop(tx);

        // the order of arrival may differ from the order of generation, so compare as a set
        let mut v: Vec<Uuid7> = rx.iter().collect();
        let n = v.len();
        v.sort();
        v.dedup();
        assert_eq!(v.len(), n);
        assert_eq!(n, 4 * 10_000);

        let mut prev = Global.uuid7();
        assert!(prev > v[n - 1]);
        for _ in 0..100_000 {
            let curr = Global.uuid7();
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = Global.uuid7();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(7));

            let e = Global.uuid4();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(4));
        }
    }
}
