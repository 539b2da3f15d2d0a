//! The [`Coro`] engine.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::task::noop_waker_ref;

use crate::engine::builder::CoroBuilder;
use crate::engine::info::{CoroId, CoroInfo, CoroState};
use crate::engine::link::{Link, Phase};
use crate::error::{Error, Result};
use crate::handle::Yield;

/// Type-erased procedure body.
type Body<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A pausable unit of work driven one suspension interval at a time.
///
/// A `Coro` wraps a procedure that receives a [`Yield`] handle. Every
/// `y.suspend().await` inside the procedure hands control back to whoever
/// called [`resume`]; the next `resume` continues from exactly that point
/// with all locals intact. Nothing runs on its own: there is no thread and
/// no runtime, the driver polls the body directly.
///
/// The procedure does not start until the first [`resume`] (see
/// [`StartPolicy`](crate::engine::StartPolicy) for the eager alternative).
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use coro::Coro;
///
/// let log = &RefCell::new(Vec::new());
///
/// let mut co = Coro::new(|y| async move {
///     log.borrow_mut().push("A");
///     y.suspend().await;
///     log.borrow_mut().push("B");
///     y.suspend().await;
///     log.borrow_mut().push("C");
/// });
///
/// assert!(log.borrow().is_empty()); // lazy start
///
/// let mut ticks = 0;
/// while co.resume() {
///     ticks += 1;
/// }
///
/// assert_eq!(ticks, 2);
/// assert_eq!(*log.borrow(), ["A", "B", "C"]);
/// assert!(!co.resume()); // exhausted stays exhausted
/// ```
///
/// [`resume`]: Coro::resume
pub struct Coro<'a, T = ()> {
    id: CoroId,
    name: Option<String>,
    /// `None` once exhausted; dropping it releases the suspended frame.
    body: Option<Body<'a, T>>,
    link: Link,
    output: Option<T>,
    resumes: usize,
}

/// How a poll of the body ended the coroutine abnormally.
enum Fault {
    Panic(Box<dyn Any + Send>),
    ForeignAwait,
}

impl Fault {
    fn into_error(self) -> Error {
        match self {
            Fault::Panic(payload) => Error::panicked(payload.as_ref()),
            Fault::ForeignAwait => Error::ForeignAwait,
        }
    }

    fn raise(self) -> ! {
        match self {
            Fault::Panic(payload) => panic::resume_unwind(payload),
            Fault::ForeignAwait => panic!("{}", Error::ForeignAwait),
        }
    }
}

impl Coro<'static> {
    /// Returns a builder for configuring a coroutine before creating it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coro::{Coro, StartPolicy};
    ///
    /// let co = Coro::builder()
    ///     .name("ticker")
    ///     .start(StartPolicy::Eager)
    ///     .build(|y| async move {
    ///         y.suspend().await;
    ///     });
    ///
    /// assert_eq!(co.name(), Some("ticker"));
    /// assert!(co.is_started());
    /// ```
    #[must_use]
    pub fn builder() -> CoroBuilder {
        CoroBuilder::new()
    }
}

impl<'a, T> Coro<'a, T> {
    /// Creates a coroutine from a procedure.
    ///
    /// The procedure is not called yet: the closure runs, together with the
    /// body it returns, on the first [`resume`](Coro::resume).
    ///
    /// # Example
    ///
    /// ```rust
    /// use coro::Coro;
    ///
    /// let co = Coro::new(|y| async move {
    ///     y.skip(3).await;
    /// });
    ///
    /// assert!(!co.is_started());
    /// ```
    pub fn new<F, Fut>(procedure: F) -> Self
    where
        F: FnOnce(Yield) -> Fut + 'a,
        Fut: Future<Output = T> + 'a,
        T: 'a,
    {
        Self::with_name(None, procedure)
    }

    pub(crate) fn with_name<F, Fut>(name: Option<String>, procedure: F) -> Self
    where
        F: FnOnce(Yield) -> Fut + 'a,
        Fut: Future<Output = T> + 'a,
        T: 'a,
    {
        let id = CoroId::new();
        let link = Link::new();
        let handle = Yield::new(link.clone());
        let body = async move { procedure(handle).await };

        tracing::debug!(coro = %id, name = ?name, "coroutine created");

        Self {
            id,
            name,
            body: Some(Box::pin(body)),
            link,
            output: None,
            resumes: 0,
        }
    }

    /// Runs the procedure until its next suspend point or until it returns.
    ///
    /// Returns `true` if the procedure suspended and can be resumed again,
    /// `false` if it has finished. Once `false` has been returned the
    /// suspended frame is already released, and every later call is a no-op
    /// that returns `false` again.
    ///
    /// # Panics
    ///
    /// If the procedure panics, the coroutine is marked exhausted and the
    /// panic continues into the caller. Panics as well if the procedure
    /// returned `Pending` without going through one of its own suspend points
    /// (it awaited some unrelated future). Use [`try_resume`] to get these as
    /// an [`Error`] instead.
    ///
    /// [`try_resume`]: Coro::try_resume
    #[must_use]
    pub fn resume(&mut self) -> bool {
        match self.poll_body(Phase::Resuming) {
            Ok(suspended) => suspended,
            Err(fault) => fault.raise(),
        }
    }

    /// Like [`resume`](Coro::resume), but reports a panicking procedure as
    /// [`Error::Panicked`] and a foreign await as [`Error::ForeignAwait`].
    ///
    /// The coroutine is exhausted after either error.
    ///
    /// # Errors
    ///
    /// Returns an error if the procedure panicked or awaited a future that is
    /// not one of its suspend points.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coro::{Coro, Error};
    ///
    /// let mut co = Coro::new(|y| async move {
    ///     y.suspend().await;
    ///     panic!("out of fuel");
    /// });
    ///
    /// assert_eq!(co.try_resume(), Ok(true));
    /// assert_eq!(co.try_resume(), Err(Error::Panicked("out of fuel".into())));
    /// assert_eq!(co.try_resume(), Ok(false));
    /// ```
    pub fn try_resume(&mut self) -> Result<bool> {
        self.poll_body(Phase::Resuming).map_err(Fault::into_error)
    }

    /// Abandons the computation.
    ///
    /// A coroutine that never started is discarded without running. A
    /// suspended one is resumed one final time: the suspend point it is
    /// parked at returns `false`, which tells the procedure to stop working
    /// and return. If it reaches another suspend point instead, it is dropped
    /// there. Either way the coroutine is exhausted afterwards. Stopping an
    /// exhausted coroutine does nothing.
    ///
    /// # Panics
    ///
    /// A panic raised by the procedure during its final resumption continues
    /// into the caller.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use coro::Coro;
    ///
    /// let cleaned_up = &Cell::new(false);
    ///
    /// let mut co = Coro::new(|y| async move {
    ///     while y.suspend().await {}
    ///     cleaned_up.set(true);
    /// });
    ///
    /// assert!(co.resume());
    /// co.stop();
    ///
    /// assert!(cleaned_up.get());
    /// assert!(co.is_exhausted());
    /// ```
    pub fn stop(&mut self) {
        if let Err(fault) = self.halt() {
            fault.raise();
        }
    }

    /// Resumes until the procedure finishes.
    ///
    /// Returns the number of suspensions that happened along the way.
    ///
    /// # Panics
    ///
    /// Same as [`resume`](Coro::resume).
    pub fn run_to_end(&mut self) -> usize {
        let mut count = 0;
        while self.resume() {
            count += 1;
        }
        count
    }

    /// Resumes at most `max_steps` times.
    ///
    /// Returns how many of those resumes ended in a suspension; this is less
    /// than `max_steps` if the procedure finished first.
    ///
    /// # Panics
    ///
    /// Same as [`resume`](Coro::resume).
    pub fn run_steps(&mut self, max_steps: usize) -> usize {
        let mut count = 0;
        while count < max_steps && self.resume() {
            count += 1;
        }
        count
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Returns this coroutine's unique identifier.
    #[must_use]
    pub fn id(&self) -> CoroId {
        self.id
    }

    /// Returns the name given through [`CoroBuilder::name`].
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> CoroState {
        if self.body.is_some() {
            CoroState::Suspended
        } else {
            CoroState::Exhausted
        }
    }

    /// Returns `true` once the procedure has been polled at least once.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.resumes > 0
    }

    /// Returns `true` if the coroutine can no longer be resumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.body.is_none()
    }

    /// Returns how many times the procedure body has been polled.
    #[must_use]
    pub fn resumes(&self) -> usize {
        self.resumes
    }

    /// Returns how many times the procedure has parked at a suspend point.
    #[must_use]
    pub fn suspensions(&self) -> usize {
        self.link.suspensions()
    }

    /// Returns a snapshot of this coroutine.
    #[must_use]
    pub fn info(&self) -> CoroInfo {
        CoroInfo {
            id: self.id,
            name: self.name.clone(),
            state: self.state(),
            resumes: self.resumes,
            suspensions: self.suspensions(),
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Returns the procedure's return value, if it has returned.
    #[must_use]
    pub fn output(&self) -> Option<&T> {
        self.output.as_ref()
    }

    /// Takes the procedure's return value, if it has returned.
    ///
    /// Returns `None` if the procedure hasn't returned or the value was
    /// already taken.
    #[must_use]
    pub fn take_output(&mut self) -> Option<T> {
        self.output.take()
    }

    /// Stops the coroutine if needed and returns the procedure's return value.
    ///
    /// A procedure that returns after observing the abandonment signal still
    /// produces a value here.
    ///
    /// # Panics
    ///
    /// Same as [`stop`](Coro::stop).
    #[must_use]
    pub fn into_output(mut self) -> Option<T> {
        self.stop();
        self.output.take()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn halt(&mut self) -> std::result::Result<(), Fault> {
        if self.body.is_none() {
            return Ok(());
        }
        if self.resumes == 0 {
            tracing::debug!(coro = %self.id, name = ?self.name, "stopped before start");
            self.finish();
            return Ok(());
        }

        tracing::debug!(coro = %self.id, name = ?self.name, "stopping");
        self.poll_body(Phase::Stopping).map(|_| ())
    }

    /// Polls the body once with the link in `phase`.
    ///
    /// Returns `Ok(true)` if the body parked at one of its suspend points.
    fn poll_body(&mut self, phase: Phase) -> std::result::Result<bool, Fault> {
        let Some(body) = self.body.as_mut() else {
            return Ok(false);
        };

        self.resumes += 1;
        tracing::trace!(coro = %self.id, resume = self.resumes, ?phase, "polling body");

        self.link.enter(phase);
        let mut cx = Context::from_waker(noop_waker_ref());
        let polled = panic::catch_unwind(AssertUnwindSafe(|| body.as_mut().poll(&mut cx)));
        let parked = self.link.leave();

        match polled {
            Ok(Poll::Pending) if parked => {
                tracing::trace!(coro = %self.id, "suspended");
                Ok(true)
            }
            Ok(Poll::Pending) if phase == Phase::Stopping => {
                tracing::warn!(
                    coro = %self.id,
                    name = ?self.name,
                    "stopped coroutine did not return, dropping it at its suspend point"
                );
                self.finish();
                Ok(false)
            }
            Ok(Poll::Pending) => {
                tracing::warn!(coro = %self.id, name = ?self.name, "coroutine awaited a foreign future");
                self.finish();
                Err(Fault::ForeignAwait)
            }
            Ok(Poll::Ready(output)) => {
                tracing::debug!(coro = %self.id, name = ?self.name, resumes = self.resumes, "finished");
                self.output = Some(output);
                self.finish();
                Ok(false)
            }
            Err(payload) => {
                tracing::debug!(coro = %self.id, name = ?self.name, "procedure panicked");
                self.finish();
                Err(Fault::Panic(payload))
            }
        }
    }

    /// Releases the suspended frame and invalidates the handle.
    fn finish(&mut self) {
        self.link.finish();
        self.body = None;
    }
}

impl<T> Drop for Coro<'_, T> {
    /// Stops a coroutine that is still suspended, so its procedure can see
    /// the abandonment signal. Skipped while already unwinding.
    fn drop(&mut self) {
        if self.body.is_none() {
            return;
        }
        if std::thread::panicking() {
            self.finish();
            return;
        }
        self.stop();
    }
}

impl<T> fmt::Debug for Coro<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coro")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state())
            .field("resumes", &self.resumes)
            .finish_non_exhaustive()
    }
}
