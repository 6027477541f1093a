//! Sources of the current instant.

use std::cell::Cell;
use std::rc::Rc;

use crate::duration::Duration;
use crate::instant::Instant;


/// A **clock** says what the current instant is. It gets asked afresh
/// every time, so two questions in a row can get different answers.
pub trait Clock {
    fn now(&self) -> Instant;
}


/// The computer’s real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}


/// A clock that only moves when it’s told to.
///
/// Clones share the same time, so a test can keep one clone around to
/// move the time forward while another is owned by the thing being tested.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<Instant>>,
}

impl FixedClock {

    /// Creates a new clock stopped at the given instant.
    pub fn at(instant: Instant) -> Self {
        Self { now: Rc::new(Cell::new(instant)) }
    }

    /// Stops the clock at a different instant.
    pub fn set(&self, instant: Instant) {
        self.now.set(instant);
    }

    /// Moves the clock along by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
