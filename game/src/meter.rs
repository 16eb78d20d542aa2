use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u32 = 0;
pub const MAX_LEVEL: u32 = 100;

pub const DEFAULT_STARTING_LEVEL: u32 = 50;
pub const DEFAULT_DECREASE_RATE: u32 = 5;
pub const DEFAULT_DECAY_INTERVAL: Duration = Duration::from_millis(5000);

/// Highest level still drawn with the sad portrait.
pub const LOW_TIER_MAX: u32 = 33;
/// Highest level still drawn with the neutral portrait.
pub const MEDIUM_TIER_MAX: u32 = 66;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterTuning {
    pub starting_level: u32,
    pub decrease_rate: u32,
    #[serde(with = "crate::serde_millis")]
    pub decay_interval: Duration,
}

impl Default for MeterTuning {
    fn default() -> Self {
        Self {
            starting_level: DEFAULT_STARTING_LEVEL,
            decrease_rate: DEFAULT_DECREASE_RATE,
            decay_interval: DEFAULT_DECAY_INTERVAL,
        }
    }
}

impl MeterTuning {
    /// A run must not start already over, and decay needs a non-zero period.
    pub fn sanitized(mut self) -> Self {
        self.starting_level = self.starting_level.clamp(MIN_LEVEL + 1, MAX_LEVEL - 1);
        self.decrease_rate = self.decrease_rate.min(MAX_LEVEL);
        self.decay_interval = self.decay_interval.max(Duration::from_millis(1));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresenceTier {
    Low,
    Medium,
    High,
}

impl PresenceTier {
    pub fn for_level(level: u32) -> Self {
        if level <= LOW_TIER_MAX {
            Self::Low
        } else if level <= MEDIUM_TIER_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// The single bounded progress variable of a run.
///
/// `level` stays within `MIN_LEVEL..=MAX_LEVEL` whatever sequence of calls is made. Time is
/// monotonic, expressed as an offset from the frame clock's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceMeter {
    level: u32,
    last_update: Duration,
    decrease_rate: u32,
    decay_interval: Duration,
}

impl PresenceMeter {
    pub fn new(now: Duration) -> Self {
        Self::with_tuning(MeterTuning::default(), now)
    }

    pub fn with_tuning(tuning: MeterTuning, now: Duration) -> Self {
        Self {
            level: tuning.starting_level.min(MAX_LEVEL),
            last_update: now,
            decrease_rate: tuning.decrease_rate,
            decay_interval: tuning.decay_interval,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn last_update(&self) -> Duration {
        self.last_update
    }

    pub fn decrease_rate(&self) -> u32 {
        self.decrease_rate
    }

    pub fn decay_interval(&self) -> Duration {
        self.decay_interval
    }

    pub fn increase(&mut self, amount: u32) {
        self.level = self.level.saturating_add(amount).min(MAX_LEVEL);
    }

    pub fn decrease(&mut self, amount: u32) {
        self.level = self.level.saturating_sub(amount).max(MIN_LEVEL);
    }

    /// Applies one decay step if strictly more than `decay_interval` passed since the last one.
    ///
    /// At most one step per call: a long gap between calls does not decay several times.
    /// Returns whether a step was applied.
    pub fn update(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_update) > self.decay_interval {
            self.decrease(self.decrease_rate);
            self.last_update = now;
            true
        } else {
            false
        }
    }

    pub fn tier(&self) -> PresenceTier {
        PresenceTier::for_level(self.level)
    }

    pub fn is_exhausted(&self) -> bool {
        self.level <= MIN_LEVEL
    }

    pub fn is_full(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    pub fn is_at_bound(&self) -> bool {
        self.is_exhausted() || self.is_full()
    }
}
