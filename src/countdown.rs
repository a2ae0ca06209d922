use std::time::Duration;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
/// Shorter periods are raised to this.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Whole-second countdown fed with elapsed wall time.
///
/// A `Countdown` only exists while an exam is running: it is created when
/// the session enters the in-progress state and dropped when it leaves, so
/// a sub-second remainder never leaks from one attempt into the next.
#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    carry: Duration,
}

impl Countdown {
    pub fn with_period(period: Duration) -> Self {
        Self {
            period: period.max(MIN_TICK_PERIOD),
            carry: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `elapsed` and returns how many ticks fell due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let mut due = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            due += 1;
        }
        due
    }
}
