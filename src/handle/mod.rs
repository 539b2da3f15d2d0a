//! Suspend points and the helpers built on them
//!
//! A procedure suspends through its [`Yield`] handle. [`Yield::suspend`] is
//! the only primitive; [`skip`], [`repeat_until`], [`repeat_while`], [`seq`]
//! and [`seq_unbounded`] are compositions of it.
//!
//! Helper procedures are plain `async fn`s that take the handle, and the
//! suspension carries through however deep the call goes:
//!
//! ```rust
//! use coro::{Coro, Yield};
//!
//! async fn think(y: &Yield, rounds: usize) -> &'static str {
//!     if !y.skip(rounds).await {
//!         return "interrupted";
//!     }
//!     "rock"
//! }
//!
//! let mut co = Coro::new(|y| async move { think(&y, 2).await });
//!
//! assert_eq!(co.run_to_end(), 2);
//! assert_eq!(co.take_output(), Some("rock"));
//! ```
//!
//! [`skip`]: Yield::skip
//! [`repeat_until`]: Yield::repeat_until
//! [`repeat_while`]: Yield::repeat_while
//! [`seq`]: Yield::seq
//! [`seq_unbounded`]: Yield::seq_unbounded

mod combinators;
mod seq;
mod suspend;

pub use seq::Seq;
pub use suspend::{Suspend, Yield};
