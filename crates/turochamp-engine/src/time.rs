//! Time management: convert clock parameters to a search control.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use chess::Color;

use crate::search::control::SearchControl;

/// Moves assumed left in the game when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u32 = 30;

/// Milliseconds held back for communication lag.
const OVERHEAD_MS: u64 = 10;

/// Compute the budget for one move from the remaining clock.
///
/// | Parameter            | Value                      |
/// |----------------------|----------------------------|
/// | Moves to go (unset)  | 30                         |
/// | Base                 | `usable / moves_to_go`     |
/// | Increment contrib    | `inc * 3 / 4`              |
/// | Hard cap             | 25% of usable              |
///
/// Never returns less than one millisecond.
pub fn compute_budget(remaining: Duration, increment: Duration, moves_to_go: Option<u32>) -> Duration {
    let remaining_ms = remaining.as_millis() as u64;
    if remaining_ms <= OVERHEAD_MS {
        return Duration::from_millis(1);
    }

    let usable = remaining_ms - OVERHEAD_MS;
    let mtg = u64::from(moves_to_go.unwrap_or(DEFAULT_MOVES_TO_GO).max(1));
    let inc_ms = increment.as_millis() as u64;

    let budget = usable / mtg + inc_ms * 3 / 4;
    let cap = usable / 4;

    Duration::from_millis(budget.min(cap).max(1))
}

/// Build a [`SearchControl`] from UCI `go` parameters and the side to move.
///
/// Priority order:
/// 1. `infinite` -> no time limits
/// 2. `movetime` -> soft and hard limit both equal to it
/// 3. clock for the side to move -> [`compute_budget`], soft limit at half
/// 4. depth only / bare `go` -> no time limits
#[allow(clippy::too_many_arguments)]
pub fn control_from_go(
    wtime: Option<Duration>,
    btime: Option<Duration>,
    winc: Option<Duration>,
    binc: Option<Duration>,
    movestogo: Option<u32>,
    movetime: Option<Duration>,
    infinite: bool,
    side: Color,
    stopped: Arc<AtomicBool>,
) -> SearchControl {
    if infinite {
        return SearchControl::new_infinite(stopped);
    }

    if let Some(mt) = movetime {
        return SearchControl::new_timed(stopped, mt, mt);
    }

    let (remaining, increment) = match side {
        Color::White => (wtime, winc),
        Color::Black => (btime, binc),
    };

    if let Some(rem) = remaining {
        let budget = compute_budget(rem, increment.unwrap_or(Duration::ZERO), movestogo);
        return SearchControl::new_timed(stopped, budget / 2, budget);
    }

    SearchControl::new_infinite(stopped)
}
