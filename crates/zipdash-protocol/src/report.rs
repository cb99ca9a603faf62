//! Batch-level aggregation of pipeline outcomes

use crate::order::OrderItem;
use crate::outcome::{FailedOrder, PipelineOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;

const SUMMARY_RULE: &str = "*****************";

/// Overall status of a settled batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Every item in the batch was delivered.
    Complete,
    /// At least one item failed.
    Incomplete,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Complete => f.write_str("Complete"),
            BatchStatus::Incomplete => f.write_str("Incomplete"),
        }
    }
}

/// The aggregated result of one batch submission.
///
/// Every item submitted to the batch appears in exactly one of the two
/// lists. Both lists are ordered by completion, not by submission: items
/// settle in whatever order their randomized latencies produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Items delivered, in completion order.
    pub delivered: Vec<OrderItem>,
    /// Items that failed, in completion order, each with its reason.
    pub failed: Vec<FailedOrder>,
    /// `Complete` when `failed` is empty, else `Incomplete`.
    pub status: BatchStatus,
}

impl BatchReport {
    /// The report for a batch with no items.
    pub fn empty() -> Self {
        Self {
            delivered: Vec::new(),
            failed: Vec::new(),
            status: BatchStatus::Complete,
        }
    }

    /// Build a report from outcomes in the order they settled.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = PipelineOutcome>) -> Self {
        let mut delivered = Vec::new();
        let mut failed = Vec::new();

        for outcome in outcomes {
            match outcome {
                PipelineOutcome::Delivered { item } => delivered.push(item),
                PipelineOutcome::Failed { item, reason } => {
                    failed.push(FailedOrder { item, reason });
                }
            }
        }

        let status = if failed.is_empty() {
            BatchStatus::Complete
        } else {
            BatchStatus::Incomplete
        };

        Self {
            delivered,
            failed,
            status,
        }
    }

    /// Number of items the batch settled.
    pub fn total(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    /// True when every item was delivered.
    pub fn is_complete(&self) -> bool {
        self.status == BatchStatus::Complete
    }

    /// Human-readable summary of the batch.
    ///
    /// Matches the layout the status panel shows after a batch settles: a
    /// `Successfully delivered:` section listing each delivered item, then a
    /// `Failed to deliver:` section listing `item: reason` lines. A section
    /// with no entries is omitted entirely.
    pub fn summary(&self) -> String {
        let mut message = String::new();

        if !self.delivered.is_empty() {
            message.push_str("Successfully delivered:\n");
            message.push_str(SUMMARY_RULE);
            message.push('\n');
            for item in &self.delivered {
                message.push_str(item.as_str());
                message.push('\n');
            }
        }

        if !self.failed.is_empty() {
            message.push_str(SUMMARY_RULE);
            message.push('\n');
            message.push_str("Failed to deliver:\n");
            message.push_str(SUMMARY_RULE);
            message.push('\n');
            for failure in &self.failed {
                message.push_str(&failure.to_string());
                message.push('\n');
            }
        }

        message
    }
}
