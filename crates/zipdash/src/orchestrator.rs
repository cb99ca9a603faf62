//! Batch orchestration
//!
//! The orchestrator fans a batch of items out into one pipeline task each,
//! waits for every task to settle (a failure in one never cancels the
//! others), and folds the outcomes into a single [`BatchReport`]. It also
//! owns the in-flight flag that refuses overlapping submissions.

use crate::chance::{ChanceSource, RandomChance};
use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::notify::StatusSink;
use crate::pipeline::OrderPipeline;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinSet;
use zipdash_protocol::{BatchReport, OrderItem};

/// Fulfills batches of order items concurrently.
///
/// One orchestrator handles one batch at a time: a submission made while a
/// batch is in flight is refused with [`Error::BatchInProgress`], not
/// queued. Pipelines share nothing beyond the chance source and the
/// caller's sink, so items cannot affect each other's progress.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use zipdash::{BatchOrchestrator, NullSink, OrderItem, SimulationConfig};
///
/// # async fn example() -> zipdash::Result<()> {
/// let orchestrator = BatchOrchestrator::new(SimulationConfig::default());
///
/// let report = orchestrator
///     .submit_batch(
///         vec![OrderItem::new("Pizza"), OrderItem::new("Sushi")],
///         Arc::new(NullSink),
///     )
///     .await?;
///
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
pub struct BatchOrchestrator {
    config: SimulationConfig,
    chance: Arc<dyn ChanceSource>,
    in_flight: AtomicBool,
}

impl BatchOrchestrator {
    /// Create an orchestrator using the default random chance source.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_chance(config, Arc::new(RandomChance))
    }

    /// Create an orchestrator with an injected chance source.
    pub fn with_chance(config: SimulationConfig, chance: Arc<dyn ChanceSource>) -> Self {
        Self {
            config,
            chance,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a batch is currently being fulfilled.
    ///
    /// Display layers use this to refuse new item selections while a batch
    /// runs.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Fulfill every item in `items` concurrently and report the outcome.
    ///
    /// All pipelines run to their terminal outcome before the report is
    /// produced; there is no cancellation and no short-circuit on first
    /// failure. The report's lists are in completion order, which is
    /// unrelated to submission order.
    ///
    /// An empty `items` settles immediately into an empty `Complete` report
    /// without claiming the in-flight flag.
    ///
    /// # Errors
    ///
    /// [`Error::BatchInProgress`] if a batch is already in flight. Nothing
    /// is started in that case and the in-flight batch is unaffected.
    pub async fn submit_batch(
        &self,
        items: Vec<OrderItem>,
        sink: Arc<dyn StatusSink>,
    ) -> Result<BatchReport> {
        if items.is_empty() {
            return Ok(BatchReport::empty());
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::BatchInProgress);
        }
        // Released on every exit path, including cancellation of this
        // future, so a wedged batch can never refuse all future submissions.
        let _guard = InFlightGuard {
            flag: &self.in_flight,
        };

        sink.batch_started();
        tracing::info!(items = items.len(), "batch started");

        let mut tasks = JoinSet::new();
        for item in items {
            let pipeline =
                OrderPipeline::new(item, self.config.clone(), Arc::clone(&self.chance));
            tasks.spawn(pipeline.run(Arc::clone(&sink)));
        }

        // Settle-all rendezvous: outcomes arrive in completion order.
        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(settled) = tasks.join_next().await {
            match settled {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => tracing::warn!(error = %err, "order pipeline aborted"),
            }
        }

        let report = BatchReport::from_outcomes(outcomes);
        tracing::info!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            status = %report.status,
            "batch settled"
        );
        Ok(report)
    }
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemorySink;
    use std::time::Duration;
    use zipdash_protocol::BatchStatus;

    struct AlwaysClears;

    impl ChanceSource for AlwaysClears {
        fn stage_clears(&self, _failure_probability: f64) -> bool {
            true
        }

        fn latency_between(&self, min: Duration, _max: Duration) -> Duration {
            min
        }
    }

    fn fast_config() -> SimulationConfig {
        SimulationConfig::builder()
            .latency_range(Duration::from_millis(1), Duration::from_millis(1))
            .build()
    }

    fn items(names: &[&str]) -> Vec<OrderItem> {
        names.iter().map(|name| OrderItem::new(*name)).collect()
    }

    #[tokio::test]
    async fn test_empty_batch_settles_immediately() {
        let orchestrator = BatchOrchestrator::new(fast_config());
        let sink = Arc::new(MemorySink::new());

        let report = orchestrator
            .submit_batch(Vec::new(), sink.clone())
            .await
            .unwrap();

        assert_eq!(report, BatchReport::empty());
        assert!(!orchestrator.is_in_flight());
        assert!(sink.events().is_empty());

        // The flag was never claimed, so the next submission goes through.
        let report = orchestrator
            .submit_batch(items(&["Pizza"]), sink)
            .await
            .unwrap();
        assert_eq!(report.total(), 1);
    }

    #[tokio::test]
    async fn test_flag_resets_after_each_batch() {
        let orchestrator =
            BatchOrchestrator::with_chance(fast_config(), Arc::new(AlwaysClears));
        let sink: Arc<dyn StatusSink> = Arc::new(MemorySink::new());

        for _ in 0..3 {
            let report = orchestrator
                .submit_batch(items(&["Pizza", "Sushi"]), Arc::clone(&sink))
                .await
                .unwrap();
            assert_eq!(report.status, BatchStatus::Complete);
            assert!(!orchestrator.is_in_flight());
        }
    }

    #[tokio::test]
    async fn test_batch_started_clears_the_sink() {
        let orchestrator =
            BatchOrchestrator::with_chance(fast_config(), Arc::new(AlwaysClears));
        let sink = Arc::new(MemorySink::new());

        orchestrator
            .submit_batch(items(&["Pizza"]), sink.clone())
            .await
            .unwrap();
        orchestrator
            .submit_batch(items(&["Sushi"]), sink.clone())
            .await
            .unwrap();

        // Only the second batch's history remains.
        assert!(sink.labels_for(&OrderItem::new("Pizza")).is_empty());
        assert_eq!(sink.labels_for(&OrderItem::new("Sushi")).len(), 4);
    }
}
