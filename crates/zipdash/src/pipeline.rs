//! Per-item fulfillment pipeline
//!
//! One pipeline drives one order item through the four fulfillment stages in
//! order, reporting every transition to the status sink. The first failing
//! stage ends the run; there is no retry.

use crate::chance::ChanceSource;
use crate::config::SimulationConfig;
use crate::notify::StatusSink;
use std::sync::Arc;
use std::time::Duration;
use zipdash_protocol::{OrderItem, PipelineOutcome, Stage};

/// Prefix of the extra notification issued when a stage fails.
const FAILURE_PREFIX: &str = "Order failed";

/// Drives a single item through the fulfillment stages.
///
/// A pipeline is built for exactly one item and consumed by [`run`]. Stage
/// success and latency come from the injected [`ChanceSource`], so a
/// scripted source can force any branch.
///
/// [`run`]: OrderPipeline::run
pub struct OrderPipeline {
    item: OrderItem,
    config: SimulationConfig,
    chance: Arc<dyn ChanceSource>,
}

impl OrderPipeline {
    /// Create a pipeline for one item.
    pub fn new(
        item: impl Into<OrderItem>,
        config: SimulationConfig,
        chance: Arc<dyn ChanceSource>,
    ) -> Self {
        Self {
            item: item.into(),
            config,
            chance,
        }
    }

    /// Run every stage in order and settle into a terminal outcome.
    ///
    /// Each stage rolls for failure first. A cleared stage notifies the sink
    /// with its success label and waits out a randomized latency; a failed
    /// stage notifies with its failure label, issues one extra
    /// `Order failed: {reason}` notification, and ends the run. Failures are
    /// terminal for this item only; other pipelines in the batch are
    /// unaffected.
    pub async fn run(self, sink: Arc<dyn StatusSink>) -> PipelineOutcome {
        for stage in Stage::ALL {
            if !self.chance.stage_clears(self.config.failure_probability()) {
                return self.abort(stage, sink.as_ref());
            }
            self.advance(stage, sink.as_ref()).await;
        }

        tracing::debug!(item = %self.item, "delivered");
        PipelineOutcome::Delivered { item: self.item }
    }

    async fn advance(&self, stage: Stage, sink: &dyn StatusSink) {
        tracing::debug!(item = %self.item, stage = %stage, "stage cleared");

        // Delivery confirms only once the courier actually arrives, so its
        // latency runs before the status update; every other stage announces
        // itself first and then takes its time.
        if stage == Stage::Delivery {
            tokio::time::sleep(self.stage_latency()).await;
            sink.status(&self.item, stage.success_label());
        } else {
            sink.status(&self.item, stage.success_label());
            tokio::time::sleep(self.stage_latency()).await;
        }
    }

    fn abort(self, stage: Stage, sink: &dyn StatusSink) -> PipelineOutcome {
        let reason = stage.failure_reason();
        tracing::debug!(item = %self.item, stage = %stage, reason, "stage failed");

        sink.status(&self.item, stage.failure_label());
        sink.status(&self.item, &format!("{FAILURE_PREFIX}: {reason}"));

        PipelineOutcome::Failed {
            item: self.item,
            reason: reason.to_string(),
        }
    }

    fn stage_latency(&self) -> Duration {
        self.chance
            .latency_between(self.config.min_latency(), self.config.max_latency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemorySink;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Clears every roll; minimum latency.
    struct AlwaysClears;

    impl ChanceSource for AlwaysClears {
        fn stage_clears(&self, _failure_probability: f64) -> bool {
            true
        }

        fn latency_between(&self, min: Duration, _max: Duration) -> Duration {
            min
        }
    }

    /// Fails the nth roll (0-indexed), clears all others.
    struct FailsOnRoll {
        target: usize,
        rolls: AtomicUsize,
    }

    impl FailsOnRoll {
        fn new(target: usize) -> Self {
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

    fn fast_config() -> SimulationConfig {
        SimulationConfig::builder()
            .latency_range(Duration::from_millis(1), Duration::from_millis(1))
            .build()
    }

    #[tokio::test]
    async fn test_success_path_notifies_each_stage_in_order() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = OrderPipeline::new("Pizza", fast_config(), Arc::new(AlwaysClears));

        let outcome = pipeline.run(sink.clone()).await;

        assert_eq!(
            outcome,
            PipelineOutcome::Delivered {
                item: OrderItem::new("Pizza")
            }
        );
        assert_eq!(
            sink.labels_for(&OrderItem::new("Pizza")),
            ["Confirmed", "Preparing", "On way", "Complete"]
        );
    }

    #[tokio::test]
    async fn test_first_failing_stage_ends_the_run() {
        for (roll, stage) in Stage::ALL.into_iter().enumerate() {
            let sink = Arc::new(MemorySink::new());
            let pipeline =
                OrderPipeline::new("Sushi", fast_config(), Arc::new(FailsOnRoll::new(roll)));

            let outcome = pipeline.run(sink.clone()).await;

            assert_eq!(
                outcome,
                PipelineOutcome::Failed {
                    item: OrderItem::new("Sushi"),
                    reason: stage.failure_reason().to_string(),
                },
                "unexpected outcome when {stage} fails"
            );

            // One success label per cleared stage, then the failure label
            // and the synthesized trailer.
            let labels = sink.labels_for(&OrderItem::new("Sushi"));
            assert_eq!(labels.len(), roll + 2, "label count when {stage} fails");
            assert_eq!(labels[roll], stage.failure_label());
            assert_eq!(
                labels[roll + 1],
                format!("Order failed: {}", stage.failure_reason())
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_notifies_only_after_its_latency() {
        let config = SimulationConfig::builder()
            .latency_range(Duration::from_secs(1), Duration::from_secs(1))
            .build();
        let sink = Arc::new(MemorySink::new());
        let pipeline = OrderPipeline::new("Tacos", config, Arc::new(AlwaysClears));

        let handle = tokio::spawn(pipeline.run(sink.clone()));
        let tacos = OrderItem::new("Tacos");

        // The first three stages announce themselves before their latency.
        tokio::task::yield_now().await;
        assert_eq!(sink.labels_for(&tacos), ["Confirmed"]);

        for expected in [
            vec!["Confirmed", "Preparing"],
            vec!["Confirmed", "Preparing", "On way"],
        ] {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
            assert_eq!(sink.labels_for(&tacos), expected);
        }

        // Delivery is silent while its latency runs.
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(sink.labels_for(&tacos), ["Confirmed", "Preparing", "On way"]);

        tokio::time::advance(Duration::from_secs(1)).await;
        let outcome = handle.await.unwrap();
        assert!(outcome.is_delivered());
        assert_eq!(
            sink.labels_for(&tacos),
            ["Confirmed", "Preparing", "On way", "Complete"]
        );
    }
}
