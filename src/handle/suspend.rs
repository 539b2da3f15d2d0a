//! The suspend-point handle.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::engine::link::{Link, Phase};

const OUTSIDE_RESUME: &str = "suspend point polled outside of a resume of its coroutine";

/// Capability to suspend the coroutine it was created for.
///
/// A `Yield` is handed to the procedure when its [`Coro`] first runs. Clone
/// it or pass `&Yield` into helper `async fn`s; suspending from a nested
/// call suspends the whole coroutine.
///
/// The handle is only meaningful while its coroutine is being resumed.
/// Awaiting a suspend point after the coroutine finished or was stopped,
/// or from outside its resume (another executor, another coroutine), panics.
///
/// `Yield` is `Send` and `Sync`, since its state sits behind a shared
/// mutex. Moving it to another thread gains nothing: a suspend point only
/// works on the thread that is resuming its coroutine, and panics anywhere
/// else.
///
/// [`Coro`]: crate::engine::Coro
#[derive(Clone, Debug)]
pub struct Yield {
    link: Link,
}

impl Yield {
    pub(crate) fn new(link: Link) -> Self {
        Self { link }
    }

    /// Suspends the coroutine until the driver resumes or stops it.
    ///
    /// The returned future resolves to `true` when the driver called
    /// [`resume`], and to `false` when it called [`stop`]. On `false` the
    /// procedure should return without doing further work.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coro::Coro;
    ///
    /// let mut co = Coro::new(|y| async move {
    ///     let mut ticks = 0;
    ///     while y.suspend().await {
    ///         ticks += 1;
    ///     }
    ///     ticks
    /// });
    ///
    /// assert!(co.resume());
    /// assert!(co.resume());
    /// assert!(co.resume());
    /// co.stop();
    /// assert_eq!(co.take_output(), Some(2));
    /// ```
    ///
    /// [`resume`]: crate::engine::Coro::resume
    /// [`stop`]: crate::engine::Coro::stop
    pub fn suspend(&self) -> Suspend {
        Suspend {
            link: self.link.clone(),
            parked: false,
        }
    }

    /// Returns `true` once the driver has asked the coroutine to stop.
    #[must_use]
    pub fn is_stopping(&self) -> bool {
        matches!(self.link.phase(), Phase::Stopping | Phase::Finished)
    }
}

/// A future that suspends its coroutine once.
///
/// Created by [`Yield::suspend`].
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Suspend {
    link: Link,
    parked: bool,
}

impl Future for Suspend {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let phase = this.link.phase();

        if matches!(phase, Phase::Resuming | Phase::Stopping) && !this.link.is_polling() {
            // Its coroutine is mid-resume, but a different body is being polled
            panic!("{OUTSIDE_RESUME}");
        }

        match phase {
            Phase::Resuming if this.parked => Poll::Ready(true),
            Phase::Resuming => {
                // First poll - hand control back to the driver
                this.link.park();
                this.parked = true;
                Poll::Pending
            }
            Phase::Stopping => {
                if this.link.signal_abandon() {
                    Poll::Ready(false)
                } else {
                    // Ignored the signal; the engine drops the body here
                    Poll::Pending
                }
            }
            Phase::Idle => panic!("{OUTSIDE_RESUME}"),
            Phase::Finished => panic!("suspend point used after its coroutine finished"),
        }
    }
}
