//! Coroutine configuration.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::engine::coro::Coro;
use crate::handle::Yield;

/// When the procedure starts running.
///
/// The policy changes what the first [`Coro::resume`] observes, so it is a
/// visible choice rather than an implementation detail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StartPolicy {
    /// Nothing runs until the first `resume`, which runs the procedure up to
    /// its first suspend point.
    #[default]
    Lazy,
    /// Construction runs the procedure up to its first suspend point, and
    /// the first `resume` continues from there.
    Eager,
}

impl fmt::Display for StartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartPolicy::Lazy => write!(f, "lazy"),
            StartPolicy::Eager => write!(f, "eager"),
        }
    }
}

impl FromStr for StartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lazy" => Ok(StartPolicy::Lazy),
            "eager" => Ok(StartPolicy::Eager),
            other => Err(format!(
                "unknown start policy: {other}. Use \"lazy\" or \"eager\""
            )),
        }
    }
}

/// Builder for [`Coro`].
///
/// # Example
///
/// ```rust
/// use coro::{CoroBuilder, StartPolicy};
///
/// let mut co = CoroBuilder::new()
///     .name("countdown")
///     .start(StartPolicy::Eager)
///     .build(|y| async move {
///         let mut left = 3;
///         while left > 0 && y.suspend().await {
///             left -= 1;
///         }
///         left
///     });
///
/// // Eager start already ran up to the first suspend point
/// assert_eq!(co.suspensions(), 1);
/// assert_eq!(co.run_to_end(), 2);
/// assert_eq!(co.take_output(), Some(0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CoroBuilder {
    name: Option<String>,
    start: StartPolicy,
}

impl CoroBuilder {
    /// Creates a builder with no name and [`StartPolicy::Lazy`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a name used in logs and [`CoroInfo`](crate::engine::CoroInfo).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the start policy.
    #[must_use]
    pub fn start(mut self, policy: StartPolicy) -> Self {
        self.start = policy;
        self
    }

    /// Returns the configured start policy.
    #[must_use]
    pub fn start_policy(&self) -> StartPolicy {
        self.start
    }

    /// Creates the coroutine.
    ///
    /// # Panics
    ///
    /// With [`StartPolicy::Eager`], a panic raised by the procedure before
    /// its first suspend point continues into the caller.
    pub fn build<'a, T, F, Fut>(self, procedure: F) -> Coro<'a, T>
    where
        F: FnOnce(Yield) -> Fut + 'a,
        Fut: Future<Output = T> + 'a,
        T: 'a,
    {
        let mut coro = Coro::with_name(self.name, procedure);
        if self.start == StartPolicy::Eager {
            let suspended = coro.resume();
            tracing::debug!(coro = %coro.id(), suspended, "eager start");
        }
        coro
    }
}
