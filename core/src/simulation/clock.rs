use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Time source and pacing strategy for sample production.
pub trait Clock {
    /// Current instant in seconds.
    fn now(&self) -> f64;
    /// Waits out one sampling interval.
    fn sleep(&mut self, interval: Duration);
    /// Called at the start of every production run.
    fn reset(&mut self) {}
}

/// Wall clock; `sleep` blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }

    fn sleep(&mut self, interval: Duration) {
        thread::sleep(interval);
    }
}

/// Synthetic clock that advances instantly on `sleep` and rewinds on `reset`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedClock {
    origin: f64,
    elapsed: f64,
}

impl SimulatedClock {
    pub fn starting_at(origin: f64) -> Self {
        Self {
            origin,
            elapsed: 0.0,
        }
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> f64 {
        self.origin + self.elapsed
    }

    fn sleep(&mut self, interval: Duration) {
        self.elapsed += interval.as_secs_f64();
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_clock_advances_without_blocking() {
        let mut clock = SimulatedClock::starting_at(100.0);
        clock.sleep(Duration::from_millis(500));
        clock.sleep(Duration::from_millis(500));
        assert_eq!(clock.now(), 101.0);
        clock.reset();
        assert_eq!(clock.now(), 100.0);
    }
}
