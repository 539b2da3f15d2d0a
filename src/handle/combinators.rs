//! Control-flow helpers built from repeated suspension.
//!
//! Every helper returns `false` as soon as a suspend point reports that the
//! coroutine is being stopped, so callers can write
//! `if !y.skip(3).await { return; }` and stay responsive to [`stop`].
//!
//! [`stop`]: crate::engine::Coro::stop

use crate::handle::seq::Seq;
use crate::handle::suspend::Yield;

impl Yield {
    /// Suspends `n` times.
    ///
    /// Returns `true` if all `n` suspensions were granted, `false` if the
    /// coroutine was stopped part way.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coro::Coro;
    ///
    /// let mut co = Coro::new(|y| async move {
    ///     y.skip(3).await;
    /// });
    ///
    /// assert_eq!(co.run_to_end(), 3);
    /// ```
    pub async fn skip(&self, n: usize) -> bool {
        for _ in 0..n {
            if !self.suspend().await {
                return false;
            }
        }
        true
    }

    /// Suspends until `done` returns `true`.
    ///
    /// If `suspend_before` is set, suspends once before the first check.
    /// Returns `true` if the loop ended because `done` returned `true`,
    /// `false` if the coroutine was stopped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use coro::Coro;
    ///
    /// let ready = &Cell::new(false);
    ///
    /// let mut co = Coro::new(|y| async move {
    ///     y.repeat_until(|| ready.get(), false).await
    /// });
    ///
    /// assert!(co.resume());
    /// assert!(co.resume());
    /// ready.set(true);
    /// assert!(!co.resume());
    /// assert_eq!(co.take_output(), Some(true));
    /// ```
    pub async fn repeat_until<F>(&self, mut done: F, suspend_before: bool) -> bool
    where
        F: FnMut() -> bool,
    {
        if suspend_before && !self.suspend().await {
            return false;
        }
        while !done() {
            if !self.suspend().await {
                return false;
            }
        }
        true
    }

    /// Suspends while `busy` returns `true`.
    ///
    /// The inverse of [`repeat_until`](Yield::repeat_until), with the same
    /// `suspend_before` behaviour and return value.
    pub async fn repeat_while<F>(&self, mut busy: F, suspend_before: bool) -> bool
    where
        F: FnMut() -> bool,
    {
        self.repeat_until(|| !busy(), suspend_before).await
    }

    /// Returns a stream of `0..n` with one suspension between adjacent items.
    ///
    /// See [`Seq`] for when exactly the suspensions happen.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cell::RefCell;
    /// use coro::Coro;
    /// use futures::StreamExt;
    ///
    /// let seen = &RefCell::new(Vec::new());
    ///
    /// let mut co = Coro::new(|y| async move {
    ///     let mut seq = y.seq(3);
    ///     while let Some(i) = seq.next().await {
    ///         seen.borrow_mut().push(i);
    ///     }
    /// });
    ///
    /// assert!(co.resume());
    /// assert_eq!(*seen.borrow(), [0]);
    /// assert_eq!(co.run_to_end(), 1);
    /// assert_eq!(*seen.borrow(), [0, 1, 2]);
    /// ```
    #[must_use]
    pub fn seq(&self, n: usize) -> Seq {
        Seq::new(self.clone(), Some(n))
    }

    /// Returns an endless stream of `0, 1, 2, ...` with one suspension
    /// between adjacent items.
    ///
    /// It ends only when the consumer stops polling it or the coroutine is
    /// stopped.
    #[must_use]
    pub fn seq_unbounded(&self) -> Seq {
        Seq::new(self.clone(), None)
    }
}
