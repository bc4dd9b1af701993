//! Jittered cache lifetimes.

use rand::Rng;
use std::time::Duration;

/// Cache lifetime drawn from `base + uniform(0, spread)`.
///
/// Keys written in a burst get decorrelated expiries instead of all lapsing at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtlPolicy {
    base: Duration,
    spread: Duration,
}

impl CacheTtlPolicy {
    pub fn new(base: Duration, spread: Duration) -> Self {
        Self { base, spread }
    }

    pub fn from_secs(base_secs: u64, spread_secs: u64) -> Self {
        Self::new(Duration::from_secs(base_secs), Duration::from_secs(spread_secs))
    }

    /// Draws one lifetime with the thread-local RNG.
    pub fn sample(&self) -> Duration {
        self.sample_with(&mut rand::rng())
    }

    /// Draws one lifetime from `rng`, at second granularity.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let spread = self.spread.as_secs();
        if spread == 0 {
            return self.base;
        }
        self.base + Duration::from_secs(rng.random_range(0..=spread))
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn spread(&self) -> Duration {
        self.spread
    }
}

impl Default for CacheTtlPolicy {
    /// 60 to 180 minutes.
    fn default() -> Self {
        Self::from_secs(60 * 60, 120 * 60)
    }
}
