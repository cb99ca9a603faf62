//! Place a small order batch and watch it settle.
//!
//! Run with: `cargo run -p zipdash --example place_order`

use std::sync::Arc;
use std::time::Duration;
use zipdash::{BatchOrchestrator, OrderItem, SimulationConfig, StatusSink};

#[tokio::main]
async fn main() -> zipdash::Result<()> {
    // Shorter latencies than the defaults so the demo settles quickly.
    let config = SimulationConfig::builder()
        .latency_range(Duration::from_millis(300), Duration::from_millis(900))
        .build();
    let orchestrator = BatchOrchestrator::new(config);

    let sink: Arc<dyn StatusSink> = Arc::new(|item: &OrderItem, label: &str| {
        println!("{item:>12}: {label}");
    });

    let order = ["Pizza", "Burger", "Sushi", "Ginger Beef", "Pasta"]
        .into_iter()
        .map(OrderItem::new)
        .collect();

    let report = orchestrator.submit_batch(order, sink).await?;

    println!();
    println!("Status: {}", report.status);
    print!("{}", report.summary());
    Ok(())
}
