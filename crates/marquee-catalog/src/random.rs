use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Source of randomness for the catalog's random selections.
///
/// A source is created once per process and handed to the service; it is
/// never rebuilt per call, so draws made in quick succession stay
/// independent.
pub trait RandomSource: Send + Sync + 'static {
    /// Runs `f` with exclusive access to a generator.
    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T;
}

/// Draws from the thread-local generator, which is seeded once per thread
/// from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        let mut rng = rand::rng();
        f(&mut rng)
    }
}

/// A deterministic generator shared by every caller.
///
/// Given the same seed and the same sequence of calls, the selections repeat
/// exactly. Meant for tests and reproducible demo runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut *rng)
    }
}

/// Either of the shipped sources, chosen at startup.
#[derive(Debug)]
pub enum ProcessRandom {
    Thread(ThreadRandom),
    Seeded(SeededRandom),
}

impl ProcessRandom {
    /// Uses a seeded generator when `seed` is given, the thread-local one otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(SeededRandom::new(seed)),
            None => Self::Thread(ThreadRandom),
        }
    }
}

impl RandomSource for ProcessRandom {
    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match self {
            Self::Thread(source) => source.with_rng(f),
            Self::Seeded(source) => source.with_rng(f),
        }
    }
}
