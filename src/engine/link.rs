//! State shared between a coroutine and its suspend points.
//!
//! The engine flips the phase around every poll of the procedure body, and
//! each [`Suspend`](crate::handle::Suspend) future reads it to decide whether
//! to park, continue, or report abandonment.
//!
//! Each thread also keeps a stack of the links whose bodies it is polling
//! right now. Nested coroutines push on top of their driver, so a suspend
//! point can tell whether its own coroutine is the one being polled.

use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::Mutex;

/// What the owning engine is doing right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Not inside a resume. Polling a suspend point now is misuse.
    Idle,
    /// Inside `resume`: suspend points park once, then grant continuation.
    Resuming,
    /// Inside `stop`: suspend points report abandonment immediately.
    Stopping,
    /// The procedure returned or was discarded.
    Finished,
}

#[derive(Debug)]
struct LinkState {
    phase: Phase,
    /// Set by a suspend point that parked during the current resume.
    parked: bool,
    /// Set once a suspend point has reported abandonment.
    signalled: bool,
    suspensions: usize,
}

thread_local! {
    static ACTIVE: RefCell<Vec<*const ()>> = const { RefCell::new(Vec::new()) };
}

/// Handle to the shared state. Cheap to clone.
#[derive(Clone, Debug)]
pub(crate) struct Link {
    state: Arc<Mutex<LinkState>>,
}

impl Link {
    /// Creates a link for a coroutine that has not started yet.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LinkState {
                phase: Phase::Idle,
                parked: false,
                signalled: false,
                suspensions: 0,
            })),
        }
    }

    fn key(&self) -> *const () {
        Arc::as_ptr(&self.state).cast()
    }

    /// Marks the start of a poll of the procedure body on this thread.
    ///
    /// Must be paired with [`leave`](Link::leave) on the same thread.
    pub fn enter(&self, phase: Phase) {
        let mut state = self.state.lock();
        state.phase = phase;
        state.parked = false;
        ACTIVE.with(|active| active.borrow_mut().push(self.key()));
    }

    /// Marks the end of a poll.
    ///
    /// Returns `true` if a suspend point parked during the poll.
    pub fn leave(&self) -> bool {
        let popped = ACTIVE.with(|active| active.borrow_mut().pop());
        debug_assert_eq!(popped, Some(self.key()), "unbalanced coroutine poll");

        let mut state = self.state.lock();
        if state.phase != Phase::Finished {
            state.phase = Phase::Idle;
        }
        std::mem::take(&mut state.parked)
    }

    /// Marks the coroutine as finished. Terminal.
    pub fn finish(&self) {
        let mut state = self.state.lock();
        state.phase = Phase::Finished;
        state.parked = false;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Returns `true` if this link's body is the innermost one being
    /// polled on the current thread.
    pub fn is_polling(&self) -> bool {
        ACTIVE.with(|active| active.borrow().last() == Some(&self.key()))
    }

    /// Records that a suspend point parked.
    pub fn park(&self) {
        let mut state = self.state.lock();
        state.parked = true;
        state.suspensions += 1;
    }

    /// Claims the abandonment signal.
    ///
    /// Returns `true` for the first caller only: the suspend point the
    /// procedure was parked at when it was stopped.
    pub fn signal_abandon(&self) -> bool {
        let mut state = self.state.lock();
        !std::mem::replace(&mut state.signalled, true)
    }

    /// Returns how many times the procedure has suspended.
    pub fn suspensions(&self) -> usize {
        self.state.lock().suspensions
    }
}
