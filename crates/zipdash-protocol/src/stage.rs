//! The fixed fulfillment stage sequence
//!
//! Every item moves through the same four stages in order: the restaurant
//! confirms the order, prepares it, a courier picks it up, and the courier
//! delivers it. Each stage carries its own status wording for the success
//! and failure paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of an item's fulfillment pipeline.
///
/// Stages always run in declaration order; a stage only starts after the
/// previous one succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The restaurant accepts (or rejects) the order.
    Confirmation,
    /// The kitchen prepares the order.
    Preparation,
    /// A courier picks the order up.
    Pickup,
    /// The courier brings the order to the customer.
    Delivery,
}

impl Stage {
    /// All stages, in execution order.
    pub const ALL: [Stage; 4] = [
        Stage::Confirmation,
        Stage::Preparation,
        Stage::Pickup,
        Stage::Delivery,
    ];

    /// Status label reported when the stage succeeds.
    pub fn success_label(self) -> &'static str {
        match self {
            Stage::Confirmation => "Confirmed",
            Stage::Preparation => "Preparing",
            Stage::Pickup => "On way",
            Stage::Delivery => "Complete",
        }
    }

    /// Status label reported when the stage fails.
    pub fn failure_label(self) -> &'static str {
        match self {
            Stage::Confirmation => "Rejected",
            Stage::Preparation => "Incomplete",
            Stage::Pickup => "No pickup",
            Stage::Delivery => "Lost",
        }
    }

    /// The reason recorded in the batch report when the stage fails.
    ///
    /// The pickup stage reports "Delivery Rejected" rather than a
    /// pickup-specific phrase; the wording is an observable contract and is
    /// kept as-is.
    pub fn failure_reason(self) -> &'static str {
        match self {
            Stage::Confirmation => "Restaurant Rejected",
            Stage::Preparation => "Restaurant Incomplete",
            Stage::Pickup => "Delivery Rejected",
            Stage::Delivery => "Delivery Lost",
        }
    }

    /// The stage that follows this one, if any.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Confirmation => Some(Stage::Preparation),
            Stage::Preparation => Some(Stage::Pickup),
            Stage::Pickup => Some(Stage::Delivery),
            Stage::Delivery => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Confirmation => "Confirmation",
            Stage::Preparation => "Preparation",
            Stage::Pickup => "Pickup",
            Stage::Delivery => "Delivery",
        };
        f.write_str(name)
    }
}
