//! # coro
//!
//! > Pausable functions for Rust
//!
//! **coro** turns an ordinary procedure into a unit of work that hands
//! control back to its driver at explicit points and later resumes exactly
//! where it left off, locals and all. Use it to drive a scripted sequence
//! one tick at a time, or to interleave linear procedures without writing
//! the state machine by hand.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use coro::Coro;
//!
//! let t = &Cell::new(0);
//!
//! let mut co = Coro::new(|y| async move {
//!     println!("{} Hello", t.get());
//!     y.suspend().await;
//!     println!("{} World", t.get());
//!     y.suspend().await;
//!     println!("{} !", t.get());
//! });
//!
//! while co.resume() {
//!     t.set(t.get() + 1);
//! }
//!
//! // 0 Hello
//! // 1 World
//! // 2 !
//! assert_eq!(t.get(), 2);
//! ```
//!
//! ## Features
//!
//! - **Step-driven engine** - [`Coro::resume`] runs one suspension interval
//! - **Cooperative stop** - [`Coro::stop`] lets the procedure see `false` at
//!   its suspend point and return cleanly
//! - **Combinators** - `skip`, `repeat_until`, `repeat_while`, counting
//!   sequences, all built on [`Yield::suspend`]
//! - **No runtime** - the body is polled in place; no threads, no executor
//! - **`#[coroutine]`** - attribute macro behind the `macros` feature

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod engine;
pub mod error;
pub mod handle;

/// Prelude for convenient imports
///
/// ```rust
/// use coro::prelude::*;
/// ```
pub mod prelude {
    pub use crate::engine::{Coro, CoroBuilder, CoroState, StartPolicy};
    pub use crate::error::{Error, Result};
    pub use crate::handle::{Seq, Suspend, Yield};
}

// Re-exports
pub use engine::{Coro, CoroBuilder, CoroId, CoroInfo, CoroState, StartPolicy};
pub use error::{Error, Result};
pub use handle::{Seq, Suspend, Yield};

// Re-export the attribute macro when macros feature is enabled
#[cfg(feature = "macros")]
pub use coro_macros::coroutine;
