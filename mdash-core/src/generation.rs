//! Monotonic tags for discarding results of superseded async work.

use std::cell::Cell;

/// Tag handed out by [`Generation::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Counter for one family of async operations. Starting a new operation
/// advances it; results carrying an older ticket are stale.
#[derive(Debug, Default)]
pub struct Generation(Cell<u64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self) -> Ticket {
        let next = self.0.get() + 1;
        self.0.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.get() == ticket.0
    }
}
