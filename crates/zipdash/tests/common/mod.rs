//! Shared fixtures for the integration suite

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use zipdash::{ChanceSource, OrderItem, SimulationConfig};

/// Clears every failure roll and always takes the minimum latency.
pub struct AlwaysClears;

impl ChanceSource for AlwaysClears {
    fn stage_clears(&self, _failure_probability: f64) -> bool {
        true
    }

    fn latency_between(&self, min: Duration, _max: Duration) -> Duration {
        min
    }
}

/// Fails the nth failure roll (0-indexed) across the whole run, clears all
/// others. With a single-item batch this forces a failure at exactly one
/// chosen stage.
pub struct FailsOnRoll {
    target: usize,
    rolls: AtomicUsize,
}

impl FailsOnRoll {
    pub fn new(target: usize) -> Self {
        Self {
            target,
            rolls: AtomicUsize::new(0),
        }
    }
}

impl ChanceSource for FailsOnRoll {
    fn stage_clears(&self, _failure_probability: f64) -> bool {
        self.rolls.fetch_add(1, Ordering::SeqCst) != self.target
    }

    fn latency_between(&self, min: Duration, _max: Duration) -> Duration {
        min
    }
}

/// Millisecond-scale latencies so tests settle fast.
pub fn fast_config() -> SimulationConfig {
    SimulationConfig::builder()
        .latency_range(Duration::from_millis(1), Duration::from_millis(1))
        .build()
}

pub fn items(names: &[&str]) -> Vec<OrderItem> {
    names.iter().map(|name| OrderItem::new(*name)).collect()
}
