//! Status notification sink
//!
//! The core reports every stage transition through a [`StatusSink`] supplied
//! by the caller. The sink is the display layer's window into a running
//! batch; the core never renders anything itself.

use std::sync::Mutex;
use zipdash_protocol::OrderItem;

/// Receives per-item status updates while a batch runs.
///
/// `status` is called synchronously from concurrently running pipelines and
/// must return promptly; any buffering, throttling, or screen refresh is the
/// sink's responsibility. Serialization across pipelines, if needed, is also
/// the sink's job.
pub trait StatusSink: Send + Sync {
    /// A stage transition or failure event for one item.
    fn status(&self, item: &OrderItem, label: &str);

    /// A new batch is starting; any per-item status history from the
    /// previous batch can be discarded.
    fn batch_started(&self) {}
}

/// Closures can serve as sinks directly. The `batch_started` hook stays a
/// no-op.
impl<F> StatusSink for F
where
    F: Fn(&OrderItem, &str) + Send + Sync,
{
    fn status(&self, item: &OrderItem, label: &str) {
        self(item, label)
    }
}

/// A sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn status(&self, _item: &OrderItem, _label: &str) {}
}

/// A sink that records updates in arrival order.
///
/// Useful for tests and for display layers that render the whole status
/// history at once. The log is cleared when a new batch starts.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(OrderItem, String)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded `(item, label)` events, in arrival order.
    pub fn events(&self) -> Vec<(OrderItem, String)> {
        self.events.lock().expect("status log poisoned").clone()
    }

    /// The labels recorded for one item, in arrival order.
    pub fn labels_for(&self, item: &OrderItem) -> Vec<String> {
        self.events
            .lock()
            .expect("status log poisoned")
            .iter()
            .filter(|(event_item, _)| event_item == item)
            .map(|(_, label)| label.clone())
            .collect()
    }
}

impl StatusSink for MemorySink {
    fn status(&self, item: &OrderItem, label: &str) {
        self.events
            .lock()
            .expect("status log poisoned")
            .push((item.clone(), label.to_string()));
    }

    fn batch_started(&self) {
        self.events.lock().expect("status log poisoned").clear();
    }
}
