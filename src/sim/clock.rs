//! Monotonic tick counter
//!
//! All gameplay timing is tick arithmetic. Timers hold the tick at which an
//! event happened (`None` = never), so there is no special meaning for tick 0.

use serde::{Deserialize, Serialize};

/// One simulation step
pub type Tick = u64;

/// Simulation clock. Advances once per update and is never reset by a game start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    ticks: Tick,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick
    #[inline]
    pub fn now(&self) -> Tick {
        self.ticks
    }

    /// Advance by one tick
    #[inline]
    pub fn advance(&mut self) {
        self.ticks += 1;
    }
}

/// True on ticks that are a multiple of `period`; a zero period fires every tick
#[inline]
pub fn every(now: Tick, period: Tick) -> bool {
    now % period.max(1) == 0
}

/// Ticks elapsed since `since`, or `None` if the event never happened
#[inline]
pub fn elapsed(now: Tick, since: Option<Tick>) -> Option<Tick> {
    since.map(|at| now.saturating_sub(at))
}

/// True when the event never happened or happened more than `window` ticks ago
#[inline]
pub fn expired(now: Tick, since: Option<Tick>, window: Tick) -> bool {
    elapsed(now, since).is_none_or(|e| e > window)
}
