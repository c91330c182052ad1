/// Periodic timer driven by explicit elapsed time
///
/// The timer never reads the clock itself. Whoever owns it feeds it the
/// elapsed time of each frame through [`IntervalTimer::advance`], so every
/// firing happens inside the single game loop that owns the timer.
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A periodic timer that can be armed and disarmed
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    /// Time between two firings
    interval: Duration,

    /// Time accumulated since the last firing
    elapsed: Duration,

    /// Whether the timer is currently running
    armed: bool,
}

impl IntervalTimer {
    /// Create a disarmed timer
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    /// Arm the timer with a new interval, restarting the count
    pub fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    /// Disarm the timer and drop any accumulated time
    pub fn stop(&mut self) {
        self.armed = false;
        self.elapsed = Duration::ZERO;
    }

    /// Check if the timer is running
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Get the interval the timer was armed with
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advance the timer, returns how many times it fired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.armed || self.interval.is_zero() {
            return 0;
        }

        self.elapsed = self.elapsed.saturating_add(dt);

        let elapsed = self.elapsed.as_nanos();
        let interval = self.interval.as_nanos();
        let remainder = elapsed % interval;
        self.elapsed = Duration::new(
            (remainder / NANOS_PER_SEC) as u64,
            (remainder % NANOS_PER_SEC) as u32,
        );

        u32::try_from(elapsed / interval).unwrap_or(u32::MAX)
    }
}
