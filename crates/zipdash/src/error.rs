//! Error types for the simulation core

use thiserror::Error;

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller of the simulation core
///
/// Individual stage failures are not errors: they are captured as data in the
/// batch report. Only structural misuse of the core surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    /// A batch is already being fulfilled. Concurrent submissions are
    /// refused, not queued; retry once the in-flight batch settles.
    #[error("a batch is already in progress")]
    BatchInProgress,
}
