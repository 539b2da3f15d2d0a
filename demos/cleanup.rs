//! Example: Abandoning a coroutine early
//!
//! The driver only has a budget of a few ticks. When it gives up, the
//! procedure sees `false` at its suspend point and gets to clean up instead
//! of being cut off mid-statement.

use coro::{Coro, StartPolicy};
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧰 coro - Cooperative stop\n");

    let mut download = Coro::builder()
        .name("download")
        .start(StartPolicy::Eager)
        .build(|y| async move {
            let mut chunks = y.seq(10);
            let mut received = 0;
            while let Some(chunk) = chunks.next().await {
                println!("   Received chunk {chunk}");
                received += 1;
            }
            if y.is_stopping() {
                println!("   Interrupted, discarding {received} chunks");
            }
            received
        });

    let budget = 3;
    let used = download.run_steps(budget);
    println!("\n   Budget of {budget} ticks used up after {used}, stopping...\n");

    let received = download.into_output();
    println!("\n✅ Download returned {received:?}");
}
