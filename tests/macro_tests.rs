//! Integration tests for the `#[coro::coroutine]` macro.

#![cfg(feature = "macros")]

use coro::{CoroState, Yield};

/// Basic coroutine without extra arguments.
#[coro::coroutine]
async fn blink(y: Yield) {
    y.suspend().await;
    y.suspend().await;
}

/// Coroutine with arguments and a return value.
#[coro::coroutine]
async fn countdown(y: Yield, from: u32) -> u32 {
    let mut left = from;
    while left > 0 && y.suspend().await {
        left -= 1;
    }
    left
}

/// Coroutine with a custom name and eager start.
#[coro::coroutine(name = "rival", start = "eager")]
async fn rival(y: Yield) -> &'static str {
    y.skip(2).await;
    "rock"
}

#[test]
fn test_basic_coroutine() {
    let mut co = blink();

    assert!(!co.is_started());
    assert_eq!(co.name(), Some("blink"));
    assert_eq!(co.run_to_end(), 2);
    assert_eq!(co.state(), CoroState::Exhausted);
}

#[test]
fn test_arguments_and_output() {
    let mut co = countdown(3);

    assert_eq!(co.run_to_end(), 3);
    assert_eq!(co.take_output(), Some(0));
}

#[test]
fn test_stop_reaches_body() {
    let mut co = countdown(10);

    assert_eq!(co.run_steps(4), 4);
    assert_eq!(co.into_output(), Some(7));
}

#[test]
fn test_name_and_eager_start() {
    let mut co = rival();

    assert_eq!(co.name(), Some("rival"));
    assert!(co.is_started());
    assert_eq!(co.suspensions(), 1);
    assert_eq!(co.run_to_end(), 1);
    assert_eq!(co.take_output(), Some("rock"));
}
