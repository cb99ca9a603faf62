//! Simulation tuning knobs

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_FAILURE_PROBABILITY: f64 = 0.15;
const DEFAULT_MIN_LATENCY: Duration = Duration::from_millis(2000);
const DEFAULT_MAX_LATENCY: Duration = Duration::from_millis(6000);

/// Tuning parameters shared by every pipeline in a batch.
///
/// The same failure probability applies to all four stages, and every
/// cleared stage draws its latency from the same inclusive range.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use zipdash::SimulationConfig;
///
/// // Defaults: 15% failure per stage, 2-6 second stage latency
/// let config = SimulationConfig::default();
///
/// // A fast, failure-free configuration for demos
/// let config = SimulationConfig::builder()
///     .failure_probability(0.0)
///     .latency_range(Duration::from_millis(100), Duration::from_millis(300))
///     .build();
/// assert_eq!(config.failure_probability(), 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    failure_probability: f64,
    min_latency: Duration,
    max_latency: Duration,
}

impl SimulationConfig {
    /// Create a new builder for configuring the simulation.
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Per-stage probability of failure, in `[0.0, 1.0]`.
    pub fn failure_probability(&self) -> f64 {
        self.failure_probability
    }

    /// Lower bound of the stage latency range.
    pub fn min_latency(&self) -> Duration {
        self.min_latency
    }

    /// Upper bound of the stage latency range. Never below `min_latency`.
    pub fn max_latency(&self) -> Duration {
        self.max_latency
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            failure_probability: DEFAULT_FAILURE_PROBABILITY,
            min_latency: DEFAULT_MIN_LATENCY,
            max_latency: DEFAULT_MAX_LATENCY,
        }
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    failure_probability: Option<f64>,
    min_latency: Option<Duration>,
    max_latency: Option<Duration>,
}

impl SimulationConfigBuilder {
    /// Set the per-stage failure probability.
    ///
    /// Values outside `[0.0, 1.0]` are clamped.
    pub fn failure_probability(mut self, probability: f64) -> Self {
        self.failure_probability = Some(probability.clamp(0.0, 1.0));
        self
    }

    /// Set the stage latency range, inclusive on both ends.
    pub fn latency_range(mut self, min: Duration, max: Duration) -> Self {
        self.min_latency = Some(min);
        self.max_latency = Some(max);
        self
    }

    /// Build the [`SimulationConfig`], using defaults for unset parameters.
    ///
    /// If the range came out inverted, the upper bound is raised to the
    /// lower bound.
    pub fn build(self) -> SimulationConfig {
        let min_latency = self.min_latency.unwrap_or(DEFAULT_MIN_LATENCY);
        let max_latency = self.max_latency.unwrap_or(DEFAULT_MAX_LATENCY).max(min_latency);

        SimulationConfig {
            failure_probability: self
                .failure_probability
                .unwrap_or(DEFAULT_FAILURE_PROBABILITY),
            min_latency,
            max_latency,
        }
    }
}
