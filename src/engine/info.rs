//! Identity and inspection types for coroutines.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a coroutine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoroId(u64);

impl CoroId {
    /// Creates a new unique coroutine ID.
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CoroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coro({})", self.0)
    }
}

/// The observable state of a coroutine.
///
/// A coroutine that has not started yet reports [`Suspended`]: it is parked
/// before its first statement. Use [`Coro::is_started`] to tell the two apart.
///
/// [`Suspended`]: CoroState::Suspended
/// [`Coro::is_started`]: crate::engine::Coro::is_started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoroState {
    /// Parked at a suspend point (or before the first statement).
    Suspended,
    /// Returned, panicked, or was stopped. Terminal.
    Exhausted,
}

impl fmt::Display for CoroState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoroState::Suspended => write!(f, "Suspended"),
            CoroState::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Snapshot of a coroutine, for debugging and tests.
#[derive(Clone, Debug)]
pub struct CoroInfo {
    /// The coroutine's unique identifier.
    pub id: CoroId,
    /// Optional name given through [`CoroBuilder::name`](crate::engine::CoroBuilder::name).
    pub name: Option<String>,
    /// Current state.
    pub state: CoroState,
    /// Number of times the procedure body has been polled.
    pub resumes: usize,
    /// Number of times the procedure has parked at a suspend point.
    pub suspensions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coro_id_unique() {
        let id1 = CoroId::new();
        let id2 = CoroId::new();
        let id3 = CoroId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_coro_id_ordering() {
        let id1 = CoroId::new();
        let id2 = CoroId::new();

        assert!(id1 < id2);
    }

    #[test]
    fn test_coro_id_display() {
        let id = CoroId::new();
        assert_eq!(id.to_string(), format!("Coro({})", id.as_u64()));
    }

    #[test]
    fn test_coro_state_display() {
        assert_eq!(CoroState::Suspended.to_string(), "Suspended");
        assert_eq!(CoroState::Exhausted.to_string(), "Exhausted");
    }
}
