//! Example: Driving a coroutine one step at a time
//!
//! A procedure prints a line, suspends, prints another line, and so on.
//! The driver counts ticks between resumes.
//!
//! Run with `RUST_LOG=coro=trace` to see the engine's events.

use std::cell::Cell;

use coro::Coro;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧰 coro - Basic stepping\n");

    let t = Cell::new(0);
    let t = &t;

    let mut co = Coro::new(|y| async move {
        println!("   {} Hello", t.get());
        y.suspend().await;
        println!("   {} World", t.get());
        y.suspend().await;
        println!("   {} !", t.get());
    });

    while co.resume() {
        t.set(t.get() + 1);
    }

    println!("\n   {:?}", co.info());
    println!("\n✅ Done after {} ticks", t.get());
}
