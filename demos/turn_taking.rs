//! Example: Turn taking between two linear procedures
//!
//! The rival AI and the player are written as straight-line `async fn`s.
//! One game coroutine calls them in turn, and every suspension inside them
//! becomes one tick of the driver loop.

use std::cell::Cell;

use coro::{Coro, Yield};
use tracing_subscriber::EnvFilter;

async fn rival_ai(y: &Yield, t: &Cell<usize>) -> &'static str {
    println!("   {} Rival AI is thinking...", t.get());
    y.suspend().await;
    println!("   {} Rival AI is still thinking...", t.get());
    y.suspend().await;
    println!("   {} Rival AI has finished thinking.", t.get());
    "rock"
}

async fn player_input(y: &Yield, t: &Cell<usize>) -> &'static str {
    for _ in 0..3 {
        println!("   {} Waiting for player input...", t.get());
        y.suspend().await;
    }
    println!("   {} Received player input.", t.get());
    "paper"
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧰 coro - Turn taking\n");

    let t = Cell::new(0);
    let t = &t;

    let mut game = Coro::builder().name("game").build(|y| async move {
        println!("   {} Rival AI's turn", t.get());
        let rival = rival_ai(&y, t).await;
        println!("   {} Rival AI chose: {rival}", t.get());

        println!("   {} Player's turn", t.get());
        let player = player_input(&y, t).await;
        println!("   {} Player chose: {player}", t.get());

        println!("   {} Choice: {rival} vs {player}", t.get());
        (rival, player)
    });

    while game.resume() {
        t.set(t.get() + 1);
    }

    if let Some((rival, player)) = game.take_output() {
        println!("\n✅ {player} beats {rival}");
    }
}
