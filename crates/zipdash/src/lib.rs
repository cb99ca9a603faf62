//! # Zipdash fulfillment core
//!
//! Simulates fulfillment of a batch of concurrently placed delivery orders.
//! Every item runs through four probabilistic stages (confirmation,
//! preparation, pickup, delivery); each stage may fail or succeed after a
//! randomized latency. Items are fulfilled concurrently and independently,
//! and the batch settles into one aggregated [`BatchReport`].
//!
//! The core consumes a list of item identifiers and a [`StatusSink`] for
//! live progress, and renders nothing itself; menus, screens, and
//! persistence belong to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zipdash::{BatchOrchestrator, NullSink, OrderItem, SimulationConfig};
//!
//! #[tokio::main]
//! async fn main() -> zipdash::Result<()> {
//!     let orchestrator = BatchOrchestrator::new(SimulationConfig::default());
//!
//!     let report = orchestrator
//!         .submit_batch(
//!             vec![OrderItem::new("Pizza"), OrderItem::new("Sushi")],
//!             Arc::new(NullSink),
//!         )
//!         .await?;
//!
//!     println!("Status: {}", report.status);
//!     print!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! Randomness is injectable: every probabilistic branch goes through the
//! [`ChanceSource`] trait, so tests force any outcome deterministically with
//! a scripted source.

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use chance::{ChanceSource, RandomChance};
pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use error::{Error, Result};
pub use notify::{MemorySink, NullSink, StatusSink};
pub use orchestrator::BatchOrchestrator;
pub use pipeline::OrderPipeline;

// Module declarations
pub mod chance;
pub mod config;
pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod pipeline;

// The shared data model, re-exported so callers need only one dependency.
pub use zipdash_protocol as protocol;
pub use zipdash_protocol::{BatchReport, BatchStatus, FailedOrder, OrderItem, PipelineOutcome, Stage};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use zipdash::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BatchOrchestrator, BatchReport, BatchStatus, ChanceSource, Error, FailedOrder,
        MemorySink, NullSink, OrderItem, PipelineOutcome, RandomChance, Result,
        SimulationConfig, Stage, StatusSink,
    };
}
