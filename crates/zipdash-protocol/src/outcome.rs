//! Terminal outcomes of a single item's pipeline run

use crate::order::OrderItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The terminal result of running one item through the pipeline.
///
/// A pipeline produces exactly one outcome: either every stage succeeded and
/// the item was delivered, or the first failing stage ended the run with a
/// reason. Once failed, no further stages execute for that item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// All four stages succeeded in order.
    Delivered {
        /// The item that was delivered.
        item: OrderItem,
    },
    /// A stage failed and ended the run.
    Failed {
        /// The item whose fulfillment failed.
        item: OrderItem,
        /// The failing stage's failure reason.
        reason: String,
    },
}

impl PipelineOutcome {
    /// The item this outcome belongs to.
    pub fn item(&self) -> &OrderItem {
        match self {
            PipelineOutcome::Delivered { item } | PipelineOutcome::Failed { item, .. } => item,
        }
    }

    /// True if the item made it through every stage.
    pub fn is_delivered(&self) -> bool {
        matches!(self, PipelineOutcome::Delivered { .. })
    }
}

/// An item that failed to deliver, paired with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedOrder {
    /// The item whose fulfillment failed.
    pub item: OrderItem,
    /// The failing stage's failure reason.
    pub reason: String,
}

impl fmt::Display for FailedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.reason)
    }
}
