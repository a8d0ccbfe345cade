//! Clock-line noise filter.
//!
//! The raw clock sample is only trusted once it has held the same value for a
//! whole debounce window. Shorter glitches never reach the framers. The
//! filtered ("stable") level is compared with the previous tick's stable level
//! to produce explicit edge events.

/// A transition of the stable clock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Edge {
    /// Stable level went from low to high.
    Rising,
    /// Stable level went from high to low. The device clocks bits out on this edge,
    /// so each falling edge is one frame tick.
    Falling,
}

/// Streak-counting debouncer for a single sampled line.
///
/// Two independent counters track how many consecutive samples were low and how
/// many were high. A sample bumps the matching counter and zeroes the other;
/// the stable level follows only when a counter reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDebouncer {
    /// Consecutive low samples, saturating at `threshold`.
    low_streak: u32,

    /// Consecutive high samples, saturating at `threshold`.
    high_streak: u32,

    /// Current stable level. `true` is the released (idle high) state.
    level: bool,

    /// Samples a new level must persist before it is accepted.
    threshold: u32,
}

impl EdgeDebouncer {
    /// Creates a debouncer at the idle (high) level.
    ///
    /// # Arguments
    /// - `threshold`: consecutive samples needed to change level, see
    ///   [`Timing::debounce_ticks`](crate::timing::Timing::debounce_ticks)
    pub fn new(threshold: u32) -> Self {
        Self {
            low_streak: 0,
            high_streak: 0,
            level: true,
            threshold,
        }
    }

    /// Zeroes both streaks and returns to the idle (high) level.
    pub fn reset(&mut self) {
        self.low_streak = 0;
        self.high_streak = 0;
        self.level = true;
    }

    /// The current stable level.
    pub fn level(&self) -> bool {
        self.level
    }

    /// Feeds one raw sample and reports the stable-level edge it caused, if any.
    pub fn update(&mut self, raw: bool) -> Option<Edge> {
        let previous = self.level;
        if raw {
            self.low_streak = 0;
            self.high_streak = self.high_streak.saturating_add(1).min(self.threshold);
            if self.high_streak >= self.threshold {
                self.level = true;
            }
        } else {
            self.high_streak = 0;
            self.low_streak = self.low_streak.saturating_add(1).min(self.threshold);
            if self.low_streak >= self.threshold {
                self.level = false;
            }
        }

        match (previous, self.level) {
            (true, false) => Some(Edge::Falling),
            (false, true) => Some(Edge::Rising),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(debouncer: &mut EdgeDebouncer, raw: bool, ticks: u32) {
        for _ in 0..ticks {
            let _ = debouncer.update(raw);
        }
    }

    #[test]
    fn test_debouncer_starts_released() {
        let debouncer = EdgeDebouncer::new(10);
        assert!(debouncer.level());
        assert_eq!(debouncer.low_streak, 0);
        assert_eq!(debouncer.high_streak, 0);
    }

    #[test]
    fn test_debouncer_falls_after_threshold() {
        let mut debouncer = EdgeDebouncer::new(10);
        for _ in 0..9 {
            assert_eq!(debouncer.update(false), None);
            assert!(debouncer.level());
        }
        assert_eq!(debouncer.update(false), Some(Edge::Falling));
        assert!(!debouncer.level());
        assert_eq!(debouncer.update(false), None);
    }

    #[test]
    fn test_debouncer_rises_after_threshold() {
        let mut debouncer = EdgeDebouncer::new(4);
        settle(&mut debouncer, false, 4);
        assert!(!debouncer.level());
        settle(&mut debouncer, true, 3);
        assert!(!debouncer.level());
        assert_eq!(debouncer.update(true), Some(Edge::Rising));
    }

    #[test]
    fn test_debouncer_rejects_every_short_glitch() {
        let threshold = 10;
        for glitch in 0..threshold {
            // Low glitch on a stable high line.
            let mut debouncer = EdgeDebouncer::new(threshold);
            settle(&mut debouncer, true, threshold);
            for _ in 0..glitch {
                assert_eq!(debouncer.update(false), None);
            }
            for _ in 0..threshold {
                assert_eq!(debouncer.update(true), None);
            }
            assert!(debouncer.level());

            // High glitch on a stable low line.
            let mut debouncer = EdgeDebouncer::new(threshold);
            settle(&mut debouncer, false, threshold);
            for _ in 0..glitch {
                assert_eq!(debouncer.update(true), None);
            }
            assert!(!debouncer.level());
        }
    }

    #[test]
    fn test_debouncer_glitch_restarts_streak() {
        let mut debouncer = EdgeDebouncer::new(5);
        settle(&mut debouncer, false, 4);
        let _ = debouncer.update(true);
        settle(&mut debouncer, false, 4);
        assert!(debouncer.level());
        assert_eq!(debouncer.update(false), Some(Edge::Falling));
    }

    #[test]
    fn test_debouncer_reset_returns_to_idle() {
        let mut debouncer = EdgeDebouncer::new(3);
        settle(&mut debouncer, false, 5);
        assert!(!debouncer.level());
        debouncer.reset();
        assert!(debouncer.level());
        assert_eq!(debouncer, EdgeDebouncer::new(3));
    }
}
