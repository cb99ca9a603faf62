//! Randomized stage decisions and latencies
//!
//! Every probabilistic branch in the simulator goes through [`ChanceSource`],
//! so tests can force any outcome deterministically by injecting a scripted
//! implementation instead of relying on actual randomness.

use rand::Rng;
use std::time::Duration;

/// A source of randomized stage decisions.
///
/// Implementations decide whether a stage clears its failure roll and how
/// long a cleared stage takes. Both draws are independent; a source must not
/// carry state between items.
pub trait ChanceSource: Send + Sync {
    /// Whether a stage clears its failure roll.
    ///
    /// Returns `true` with probability `1 - failure_probability`. Callers
    /// pass a probability already clamped to `[0.0, 1.0]`.
    fn stage_clears(&self, failure_probability: f64) -> bool;

    /// A uniformly distributed latency in `[min, max]`, inclusive, with
    /// millisecond granularity.
    ///
    /// Callers guarantee `min <= max`.
    fn latency_between(&self, min: Duration, max: Duration) -> Duration;
}

/// The default chance source, backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChance;

impl ChanceSource for RandomChance {
    fn stage_clears(&self, failure_probability: f64) -> bool {
        // A draw below the failure probability fails the stage.
        rand::thread_rng().gen_range(0.0..1.0) >= failure_probability
    }

    fn latency_between(&self, min: Duration, max: Duration) -> Duration {
        let lo = min.as_millis() as u64;
        let hi = max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}
