//! Order item identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque identifier naming one item being fulfilled.
///
/// The simulator treats the name as a black box: equality is by value, and
/// the identifier is created once by the caller and consumed by exactly one
/// pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItem(String);

impl OrderItem {
    /// Create a new order item from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The item's name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() honors width/alignment flags, so status displays can
        // right-justify item names.
        f.pad(&self.0)
    }
}

impl From<&str> for OrderItem {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for OrderItem {
    fn from(name: String) -> Self {
        Self(name)
    }
}
