//! Error definitions
//!
//! This module provides the error type returned by [`Coro::try_resume`].
//! Misusing a suspend point is not reported through [`Error`]: it panics,
//! because it means a [`Yield`] escaped the coroutine it belongs to.
//!
//! [`Coro::try_resume`]: crate::engine::Coro::try_resume
//! [`Yield`]: crate::handle::Yield

use std::any::Any;

use thiserror::Error;

/// Main error type for coro
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The procedure panicked while it was being resumed.
    #[error("coroutine panicked: {0}")]
    Panicked(String),

    /// The procedure returned `Pending` without reaching one of its own
    /// suspend points.
    #[error("coroutine awaited a future that is not one of its suspend points")]
    ForeignAwait,
}

impl Error {
    /// Create a panicked error from a panic payload.
    #[must_use]
    pub fn panicked(payload: &(dyn Any + Send)) -> Self {
        Self::Panicked(panic_message(payload))
    }
}

/// Extracts the message carried by a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
