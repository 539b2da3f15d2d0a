//! The suspension engine
//!
//! This module provides [`Coro`], which turns a procedure into a unit of
//! work that runs one suspension interval per [`Coro::resume`]. Like a
//! deterministic test executor, it never runs anything on its own: the
//! driver decides when the next interval happens, and whether there will be
//! one at all.
//!
//! # Example
//!
//! ```rust
//! use coro::engine::{Coro, CoroState};
//!
//! let mut co = Coro::new(|y| async move {
//!     for _ in 0..3 {
//!         if !y.suspend().await {
//!             return;
//!         }
//!     }
//! });
//!
//! assert_eq!(co.state(), CoroState::Suspended);
//!
//! // Step through execution manually
//! assert!(co.resume());
//! assert!(co.resume());
//!
//! // Abandon the rest
//! co.stop();
//! assert_eq!(co.state(), CoroState::Exhausted);
//! ```

mod builder;
mod coro;
mod info;
pub(crate) mod link;

pub use builder::{CoroBuilder, StartPolicy};
pub use coro::Coro;
pub use info::{CoroId, CoroInfo, CoroState};
