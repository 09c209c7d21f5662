use std::time::{Duration, Instant};

/// Millisecond clock anchored at construction.
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since construction. Monotonic; wraps after ~49 days.
    pub fn ticks_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    /// Block for at least `ms` milliseconds.
    pub fn sleep_ms(&self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_monotonic() {
        let clock = Clock::new();
        let a = clock.ticks_ms();
        let b = clock.ticks_ms();
        assert!(b >= a);
    }

    #[test]
    fn sleep_does_not_return_early() {
        let clock = Clock::new();
        let before = clock.ticks_ms();
        clock.sleep_ms(20);
        assert!(clock.ticks_ms() - before >= 20);
    }
}
