//! Process-wide strengthened random number source.
//!
//! A [`RandomStrengthener`] mixes the operating system RNG with any number of
//! registered [`EntropySource`]s through SHA-256 and seeds a fresh `StdRng`
//! from the digest every time a generator is requested. A single instance is
//! shared by the whole process through [`RandomStrengthener::global`], which is
//! created lazily on first use.

use std::sync::{Mutex, OnceLock};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::trace;
use zeroize::Zeroize;

/// Bytes drawn from the OS RNG for every reseed.
const OS_ENTROPY_LEN: usize = 32;

/// An additional input mixed into every reseed.
///
/// Implementations might read hardware sensors, user input timings or a
/// platform-specific RNG. Output does not need to be uniformly random; it is
/// hashed together with OS entropy.
pub trait EntropySource: Send + Sync {
    fn provide_entropy(&self) -> Vec<u8>;
}

/// Mixes OS randomness with registered entropy sources.
pub struct RandomStrengthener {
    sources: Vec<Box<dyn EntropySource>>,
}

static GLOBAL: OnceLock<Mutex<RandomStrengthener>> = OnceLock::new();

impl RandomStrengthener {
    /// Create a strengthener with no additional sources.
    pub fn new() -> Self {
        RandomStrengthener { sources: Vec::new() }
    }

    /// The process-wide instance, created on first call.
    pub fn global() -> &'static Mutex<RandomStrengthener> {
        GLOBAL.get_or_init(|| {
            trace!("initializing global random strengthener");
            Mutex::new(RandomStrengthener::new())
        })
    }

    /// Register an additional entropy source for all future reseeds.
    pub fn add_entropy_source(&mut self, source: Box<dyn EntropySource>) {
        self.sources.push(source);
        trace!(sources = self.sources.len(), "entropy source registered");
    }

    /// Number of registered additional sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Build a freshly seeded generator.
    ///
    /// # Returns
    /// A `StdRng` seeded with `SHA-256(os_entropy || source_1 || ... || source_n)`.
    pub fn generate_and_seed_rng(&self) -> StdRng {
        let mut hasher = Sha256::new();

        let mut os_bytes = [0u8; OS_ENTROPY_LEN];
        OsRng.fill_bytes(&mut os_bytes);
        hasher.update(os_bytes);
        os_bytes.zeroize();

        for source in &self.sources {
            let mut extra = source.provide_entropy();
            hasher.update(&extra);
            extra.zeroize();
        }

        let mut seed: [u8; 32] = hasher.finalize().into();
        let rng = StdRng::from_seed(seed);
        seed.zeroize();
        trace!(sources = self.sources.len(), "random generator reseeded");
        rng
    }

    /// Fill `dest` from the global instance.
    ///
    /// A poisoned lock is recovered; the guarded state is only the source list.
    pub fn fill_bytes_global(dest: &mut [u8]) {
        let guard = Self::global()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.generate_and_seed_rng().fill_bytes(dest);
    }
}

impl Default for RandomStrengthener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl EntropySource for CountingSource {
        fn provide_entropy(&self) -> Vec<u8> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            vec![0xAB; 16]
        }
    }

    #[test]
    fn test_sources_are_consulted_on_reseed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut strengthener = RandomStrengthener::new();
        strengthener.add_entropy_source(Box::new(CountingSource { calls: calls.clone() }));
        assert_eq!(strengthener.source_count(), 1);

        let _ = strengthener.generate_and_seed_rng();
        let _ = strengthener.generate_and_seed_rng();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_generators_differ_between_reseeds() {
        let strengthener = RandomStrengthener::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        strengthener.generate_and_seed_rng().fill_bytes(&mut a);
        strengthener.generate_and_seed_rng().fill_bytes(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_global_is_a_single_instance() {
        let first = RandomStrengthener::global() as *const _;
        let second = RandomStrengthener::global() as *const _;
        assert_eq!(first, second);

        let mut out = [0u8; 8];
        RandomStrengthener::fill_bytes_global(&mut out);
    }
}
