//! Generation-keyed transition lock shared by the story player and the
//! location detail page.
//!
//! Every accepted transition gets a [`TransitionTicket`]. Asynchronous
//! completions (timers, image preloads) present their ticket back to the
//! lock; a ticket from an older generation is stale and its completion is
//! dropped instead of being applied to whatever is on screen now.

/// Proof that a transition was accepted, tied to one lock generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket {
    generation: u64,
}

impl TransitionTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// At-most-one in-flight transition. Requests arriving while one is in flight
/// are refused, never queued.
#[derive(Debug, Clone, Default)]
pub struct TransitionLock {
    generation: u64,
    in_flight: bool,
}

impl TransitionLock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            in_flight: false,
        }
    }

    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Take the lock for a new transition, or `None` while one is running.
    pub fn try_acquire(&mut self) -> Option<TransitionTicket> {
        if self.in_flight {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = true;
        Some(TransitionTicket {
            generation: self.generation,
        })
    }

    /// Whether `ticket` belongs to the transition currently holding the lock.
    #[must_use]
    pub const fn is_current(&self, ticket: TransitionTicket) -> bool {
        self.in_flight && ticket.generation == self.generation
    }

    /// Release the lock. Stale tickets are ignored and return `false`.
    pub fn release(&mut self, ticket: TransitionTicket) -> bool {
        if self.is_current(ticket) {
            self.in_flight = false;
            true
        } else {
            false
        }
    }

    /// Drop any in-flight transition; every outstanding ticket becomes stale.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = false;
    }
}

/// Latest-wins scheduling: only the most recently scheduled ticket fires.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    generation: u64,
}

impl Debounce {
    pub fn schedule(&mut self) -> TransitionTicket {
        self.generation = self.generation.wrapping_add(1);
        TransitionTicket {
            generation: self.generation,
        }
    }

    #[must_use]
    pub const fn should_fire(&self, ticket: TransitionTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
