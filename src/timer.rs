//! Cancellable, poll-driven timers.
//!
//! Nothing runs in the background: the owner calls `poll` from its event
//! loop and acts on what fired. Arming an already armed timer replaces the
//! previous deadline, so there is never more than one pending. A deadline
//! the clock cannot represent leaves the timer disarmed.

use std::time::{Duration, Instant};

/// Fires every `period` while armed
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Returns false if the first deadline overflows the clock
    pub fn arm(&mut self, now: Instant) -> bool {
        self.next_due = now.checked_add(self.period);
        self.next_due.is_some()
    }

    /// Returns true if the timer was armed
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of periods that elapsed since the last poll (0 if not due)
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        if due > now {
            return 0;
        }
        if self.period.is_zero() {
            return 1;
        }

        let mut fired = 0;
        while due <= now {
            fired += 1;
            match due.checked_add(self.period) {
                Some(next) => due = next,
                None => {
                    self.next_due = None;
                    return fired;
                }
            }
        }
        self.next_due = Some(due);
        fired
    }
}

/// Fires once at a deadline, then disarms itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneShotTimer {
    due: Option<Instant>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `now + delay` overflows the clock
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> bool {
        self.due = now.checked_add(delay);
        self.due.is_some()
    }

    /// Returns true if a deadline was pending
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_repeating_not_armed_never_fires() {
        let mut timer = RepeatingTimer::new(secs(1));
        let now = Instant::now();

        assert_eq!(timer.poll(now + secs(10)), 0);
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut timer = RepeatingTimer::new(secs(1));
        let t0 = Instant::now();
        timer.arm(t0);

        assert_eq!(timer.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(timer.poll(t0 + secs(1)), 1);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1500)), 0);
        assert_eq!(timer.poll(t0 + secs(2)), 1);
    }

    #[test]
    fn test_repeating_catches_up_after_stall() {
        let mut timer = RepeatingTimer::new(secs(1));
        let t0 = Instant::now();
        timer.arm(t0);

        assert_eq!(timer.poll(t0 + Duration::from_millis(3500)), 3);
        assert_eq!(timer.poll(t0 + secs(4)), 1);
    }

    #[test]
    fn test_repeating_cancel_reports_once() {
        let mut timer = RepeatingTimer::new(secs(1));
        let t0 = Instant::now();
        timer.arm(t0);

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert_eq!(timer.poll(t0 + secs(5)), 0);
    }

    #[test]
    fn test_repeating_rearm_replaces_deadline() {
        let mut timer = RepeatingTimer::new(secs(1));
        let t0 = Instant::now();
        timer.arm(t0);
        timer.arm(t0 + Duration::from_millis(500));

        assert_eq!(timer.poll(t0 + secs(1)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1500)), 1);
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timer = OneShotTimer::new();
        let t0 = Instant::now();
        timer.schedule(t0, secs(3));

        assert!(!timer.poll(t0 + Duration::from_millis(2999)));
        assert!(timer.poll(t0 + secs(3)));
        assert!(!timer.poll(t0 + secs(4)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_one_shot_cancel_prevents_fire() {
        let mut timer = OneShotTimer::new();
        let t0 = Instant::now();
        timer.schedule(t0, secs(3));

        assert!(timer.cancel());
        assert!(!timer.poll(t0 + secs(10)));
        assert!(!timer.cancel());
    }

    #[test]
    fn test_one_shot_unrepresentable_delay_stays_disarmed() {
        let mut timer = OneShotTimer::new();
        let t0 = Instant::now();
        timer.schedule(t0, secs(1));

        assert!(!timer.schedule(t0, Duration::from_secs(u64::MAX)));
        assert!(!timer.is_pending());
        assert!(!timer.poll(t0 + secs(10)));
    }

    #[test]
    fn test_repeating_unrepresentable_period_stays_disarmed() {
        let mut timer = RepeatingTimer::new(Duration::from_secs(u64::MAX));
        let t0 = Instant::now();

        assert!(!timer.arm(t0));
        assert!(!timer.is_armed());
        assert_eq!(timer.poll(t0 + secs(10)), 0);
    }

    #[test]
    fn test_repeating_zero_period_fires_once_per_poll() {
        let mut timer = RepeatingTimer::new(Duration::ZERO);
        let t0 = Instant::now();
        timer.arm(t0);

        assert_eq!(timer.poll(t0), 1);
        assert_eq!(timer.poll(t0 + secs(1)), 1);
    }

    #[test]
    fn test_one_shot_remaining() {
        let mut timer = OneShotTimer::new();
        let t0 = Instant::now();
        assert_eq!(timer.remaining(t0), None);

        timer.schedule(t0, secs(3));
        assert_eq!(timer.remaining(t0 + secs(1)), Some(secs(2)));
        assert_eq!(timer.remaining(t0 + secs(5)), Some(Duration::ZERO));
    }
}
