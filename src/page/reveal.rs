//! Timed reveal for the dashboard indicators.
//!
//! Pressing an indicator button hides it and shows a spinner. The spinner is
//! hidden after `SPINNER_DURATION` and the result appears at `RESULT_DELAY`.
//! The schedule is a pair of deadlines checked by the caller's event loop,
//! so there is nothing left running once a reveal is cancelled.

use std::time::{Duration, Instant};

pub const SPINNER_DURATION: Duration = Duration::from_millis(5000);
pub const RESULT_DELAY: Duration = Duration::from_millis(5200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Button showing, nothing scheduled.
    Idle,
    /// Spinner showing.
    Loading,
    /// Spinner gone, result not yet shown.
    Settling,
    /// Result showing.
    Revealed,
}

#[derive(Debug, Clone, Default)]
pub struct Reveal {
    started: Option<Instant>,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the reveal. Returns `false` (and changes nothing) if one is
    /// already pending or shown.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.started.is_some() {
            return false;
        }
        self.started = Some(now);
        true
    }

    /// Drop any pending schedule and show the button again.
    pub fn cancel(&mut self) {
        self.started = None;
    }

    pub fn phase(&self, now: Instant) -> RevealPhase {
        let Some(started) = self.started else {
            return RevealPhase::Idle;
        };
        let elapsed = now.saturating_duration_since(started);
        if elapsed < SPINNER_DURATION {
            RevealPhase::Loading
        } else if elapsed < RESULT_DELAY {
            RevealPhase::Settling
        } else {
            RevealPhase::Revealed
        }
    }

    pub fn button_visible(&self) -> bool {
        self.started.is_none()
    }

    /// Next instant at which `phase` changes, if any.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let started = self.started?;
        [started + SPINNER_DURATION, started + RESULT_DELAY]
            .into_iter()
            .find(|deadline| *deadline > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_through_phases() {
        let t0 = Instant::now();
        let mut r = Reveal::new();
        assert_eq!(r.phase(t0), RevealPhase::Idle);
        assert!(r.button_visible());

        assert!(r.trigger(t0));
        assert!(!r.button_visible());
        assert_eq!(r.phase(t0), RevealPhase::Loading);
        assert_eq!(r.phase(t0 + Duration::from_millis(4999)), RevealPhase::Loading);
        assert_eq!(r.phase(t0 + Duration::from_millis(5000)), RevealPhase::Settling);
        assert_eq!(r.phase(t0 + Duration::from_millis(5199)), RevealPhase::Settling);
        assert_eq!(r.phase(t0 + Duration::from_millis(5200)), RevealPhase::Revealed);
    }

    #[test]
    fn retrigger_does_not_restart_the_schedule() {
        let t0 = Instant::now();
        let mut r = Reveal::new();
        r.trigger(t0);
        assert!(!r.trigger(t0 + Duration::from_secs(3)));
        assert_eq!(r.phase(t0 + Duration::from_millis(5200)), RevealPhase::Revealed);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let t0 = Instant::now();
        let mut r = Reveal::new();
        r.trigger(t0);
        r.cancel();
        assert_eq!(r.phase(t0 + Duration::from_secs(10)), RevealPhase::Idle);
        assert_eq!(r.next_deadline(t0), None);
        assert!(r.trigger(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn deadlines_follow_the_schedule() {
        let t0 = Instant::now();
        let mut r = Reveal::new();
        r.trigger(t0);
        assert_eq!(r.next_deadline(t0), Some(t0 + SPINNER_DURATION));
        assert_eq!(r.next_deadline(t0 + SPINNER_DURATION), Some(t0 + RESULT_DELAY));
        assert_eq!(r.next_deadline(t0 + RESULT_DELAY), None);
    }
}
