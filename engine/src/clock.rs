use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// One time sample, taken once per tick.
///
/// `mono` is monotonic time since the clock started and is what timers should compare.
/// `wall` is time since the UNIX epoch and is only meant for human-facing durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTime {
    pub mono: Duration,
    pub wall: Duration,
}

impl FrameTime {
    /// Both clocks at the same offset, for scripted runs and tests.
    pub const fn at(elapsed: Duration) -> Self {
        Self {
            mono: elapsed,
            wall: elapsed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn sample(&self) -> FrameTime {
        FrameTime {
            mono: self.origin.elapsed(),
            // A wall clock set before 1970 reads as the epoch itself.
            wall: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default(),
        }
    }
}

/// Fixed-rate frame pacing.
///
/// `next_deadline` never schedules into the past: after a stall the pacer skips ahead rather
/// than firing a burst of catch-up frames.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
    next: Instant,
}

impl FramePacer {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            next: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    pub fn next_deadline(&mut self, now: Instant) -> Instant {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        self.next
    }
}
