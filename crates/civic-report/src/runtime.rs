use chrono::{DateTime, Utc};
use rand::Rng;

/// Source of the current time, injectable so tests can pin timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of uniform randomness, injectable so tests can script draws.
pub trait Randomness: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

/// Thread-local RNG implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}
