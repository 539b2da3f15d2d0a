//! Assertions for driving coroutines in tests.
//!
//! - [`assert_suspends!`] - Resume once and assert the procedure suspended
//! - [`assert_finishes!`] - Resume once and assert the procedure finished
//! - [`assert_exhausted!`] - Assert the coroutine cannot be resumed anymore
//!
//! # Example
//!
//! ```rust
//! use coro::{assert_exhausted, assert_finishes, assert_suspends, Coro};
//!
//! let mut co = Coro::new(|y| async move {
//!     y.skip(2).await;
//! });
//!
//! assert_suspends!(co);
//! assert_suspends!(co, "second interval");
//! assert_finishes!(co);
//! assert_exhausted!(co);
//! ```

/// Resume a coroutine once and assert that it suspended.
///
/// # Panics
///
/// Panics if [`Coro::resume`](crate::engine::Coro::resume) returns `false`.
#[macro_export]
macro_rules! assert_suspends {
    ($coro:expr) => {{
        if !$coro.resume() {
            panic!("assertion failed: expected coroutine to suspend, but it finished");
        }
    }};
    ($coro:expr, $($arg:tt)+) => {{
        if !$coro.resume() {
            panic!(
                "assertion failed: expected coroutine to suspend, but it finished: {}",
                format_args!($($arg)+)
            );
        }
    }};
}

/// Resume a coroutine once and assert that it finished.
///
/// # Panics
///
/// Panics if [`Coro::resume`](crate::engine::Coro::resume) returns `true`.
#[macro_export]
macro_rules! assert_finishes {
    ($coro:expr) => {{
        if $coro.resume() {
            panic!("assertion failed: expected coroutine to finish, but it suspended");
        }
    }};
    ($coro:expr, $($arg:tt)+) => {{
        if $coro.resume() {
            panic!(
                "assertion failed: expected coroutine to finish, but it suspended: {}",
                format_args!($($arg)+)
            );
        }
    }};
}

/// Assert that a coroutine is exhausted and that resuming it is a no-op.
///
/// # Panics
///
/// Panics if the coroutine is still suspended.
#[macro_export]
macro_rules! assert_exhausted {
    ($coro:expr) => {{
        if !$coro.is_exhausted() || $coro.resume() {
            panic!(
                "assertion failed: expected coroutine to be exhausted, but it was {}",
                $coro.state()
            );
        }
    }};
}
