//! Search control: stop flag and time budget.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Nodes between clock reads.
const CLOCK_CHECK_MASK: u64 = 2047;

/// Decides when a search should stop.
///
/// Polled at the top of every search frame. Supports two modes:
/// - **Infinite**: only the external stop flag ends the search
/// - **Timed**: a soft limit ends iterative deepening between depths, a hard
///   limit aborts the current iteration
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    soft_limit: Option<Duration>,
    hard_limit: Option<Duration>,
}

impl SearchControl {
    /// Control for `go infinite` or a fixed depth: no time limits.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            soft_limit: None,
            hard_limit: None,
        }
    }

    /// Control with explicit limits; the clock starts immediately.
    pub fn new_timed(stopped: Arc<AtomicBool>, soft: Duration, hard: Duration) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            soft_limit: Some(soft),
            hard_limit: Some(hard),
        }
    }

    /// Control for a single move budget.
    ///
    /// The budget is the hard limit; no new depth is started once half of
    /// it has elapsed.
    pub fn with_budget(budget: Duration) -> Self {
        Self::new_timed(Arc::new(AtomicBool::new(false)), budget / 2, budget)
    }

    /// Should the search abort right now?
    ///
    /// The clock is only read every 2048 nodes. Once the hard limit fires
    /// the stop flag is raised so later calls return immediately.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if nodes & CLOCK_CHECK_MASK != 0 {
            return false;
        }

        if let Some(hard) = self.hard_limit
            && self.elapsed() >= hard
        {
            self.stopped.store(true, Ordering::Release);
            return true;
        }

        false
    }

    /// Should iterative deepening stop before starting another depth?
    pub fn should_stop_iterating(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        self.soft_limit
            .is_some_and(|soft| self.elapsed() >= soft)
    }

    /// Has the search been stopped, by the flag or the hard limit?
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Raise the stop flag.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}

impl std::fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchControl")
            .field("stopped", &self.is_stopped())
            .field("soft_limit", &self.soft_limit)
            .field("hard_limit", &self.hard_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[test]
    fn infinite_never_stops_on_its_own() {
        let control = SearchControl::new_infinite(flag());
        assert!(!control.should_stop(0));
        assert!(!control.should_stop(4096));
        assert!(!control.should_stop_iterating());
    }

    #[test]
    fn external_flag_stops() {
        let stopped = flag();
        let control = SearchControl::new_infinite(Arc::clone(&stopped));
        stopped.store(true, Ordering::Relaxed);
        assert!(control.should_stop(1));
        assert!(control.should_stop_iterating());
    }

    #[test]
    fn expired_hard_limit_raises_flag() {
        let control = SearchControl::new_timed(flag(), Duration::ZERO, Duration::ZERO);
        // Off the clock-check boundary the flag is still down
        assert!(!control.should_stop(1));
        assert!(control.should_stop(2048));
        assert!(control.is_stopped());
        assert!(control.should_stop(1));
    }

    #[test]
    fn soft_limit_ends_iteration() {
        let control = SearchControl::new_timed(flag(), Duration::ZERO, Duration::from_secs(60));
        assert!(control.should_stop_iterating());
        assert!(!control.should_stop(0));
    }

    #[test]
    fn budget_splits_soft_and_hard() {
        let control = SearchControl::with_budget(Duration::from_secs(60));
        assert_eq!(control.soft_limit, Some(Duration::from_secs(30)));
        assert_eq!(control.hard_limit, Some(Duration::from_secs(60)));
        assert!(!control.should_stop_iterating());
    }

    #[test]
    fn stop_is_sticky() {
        let control = SearchControl::new_infinite(flag());
        control.stop();
        assert!(control.should_stop(7));
        assert!(control.stop_flag().load(Ordering::Relaxed));
    }
}
