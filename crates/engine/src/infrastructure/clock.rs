//! Clock and random implementations.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// System clock - uses real time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses the thread-local generator.
#[derive(Debug, Default)]
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Fixed clock for testing.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Replays a scripted sequence of values, then falls back to `min`.
///
/// Values outside the requested range are clamped into it.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: Mutex<VecDeque<i32>>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomPort for SequenceRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        let next = match self.values.lock() {
            Ok(mut values) => values.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        next.map(|v| v.clamp(min, max.max(min))).unwrap_or(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom::new();
        for _ in 0..200 {
            let v = random.gen_range(1, 6);
            assert!((1..=6).contains(&v));
        }
        assert_eq!(random.gen_range(4, 4), 4);
    }

    #[test]
    fn sequence_random_replays_then_falls_back() {
        let random = SequenceRandom::new([3, 20, 0]);
        assert_eq!(random.gen_range(1, 6), 3);
        assert_eq!(random.gen_range(1, 6), 6);
        assert_eq!(random.gen_range(1, 6), 1);
        assert_eq!(random.gen_range(2, 8), 2);
    }
}
