//! Countdown clocks.

use crate::Side;
use std::time::Duration;

/// Remaining time for both sides.
///
/// Only the side on move is ever charged, and a clock stops at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockPair {
    human: Duration,
    opponent: Duration,
}

impl ClockPair {
    /// Both clocks start with `initial`.
    pub const fn new(initial: Duration) -> Self {
        ClockPair {
            human: initial,
            opponent: initial,
        }
    }

    pub fn remaining(&self, side: Side) -> Duration {
        match side {
            Side::Human => self.human,
            Side::Opponent => self.opponent,
        }
    }

    /// Subtracts `elapsed` from `side`'s clock and returns what is left.
    pub fn charge(&mut self, side: Side, elapsed: Duration) -> Duration {
        let clock = match side {
            Side::Human => &mut self.human,
            Side::Opponent => &mut self.opponent,
        };
        *clock = clock.saturating_sub(elapsed);
        *clock
    }

    pub fn is_expired(&self, side: Side) -> bool {
        self.remaining(side).is_zero()
    }
}

/// Formats a clock as `M:SS`, rounding partial seconds up.
///
/// ```
/// use chess_session::format_clock;
/// use std::time::Duration;
///
/// assert_eq!(format_clock(Duration::from_secs(300)), "5:00");
/// assert_eq!(format_clock(Duration::from_millis(59_100)), "1:00");
/// ```
pub fn format_clock(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}
