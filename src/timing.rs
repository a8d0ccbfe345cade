//! Tick-rate configuration and the durations derived from it.
//!
//! The controller has no notion of wall-clock time. A [`Timing`] value fixes
//! how many ticks make up a millisecond and precomputes every window the
//! protocol needs, so the per-tick path only compares counters.

use crate::consts::{
    DEBOUNCE_DIVISOR, DEFAULT_SEND_TIMEOUT_MS, HOLD_ASSERT_EXTRA_TICKS, HOLD_BASE_DIVISOR,
    HOLD_LOW_TICKS, INHIBIT_MS, MIN_TICKS_PER_MS,
};
use crate::error::ConfigError;

/// Tick counts derived from a fixed tick rate.
///
/// Built once with [`Timing::new`] and handed to the controller at construction;
/// it cannot change for the lifetime of that controller.
///
/// # Example
/// ```rust
/// use ps2phy::timing::Timing;
///
/// let timing = Timing::new(1_500).unwrap();
/// assert_eq!(timing.debounce_ticks(), 10);
/// assert_eq!(timing.hold_assert_ticks(), 200);
/// assert_eq!(timing.inhibit_ticks(), 16_500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Timing {
    ticks_per_ms: u32,
    debounce_ticks: u32,
    hold_assert_ticks: u32,
    hold_release_ticks: u32,
    inhibit_ticks: u32,
    send_timeout_ticks: Option<u32>,
}

impl Timing {
    /// Derives all protocol windows from `ticks_per_ms`.
    ///
    /// The send timeout defaults to
    /// [`DEFAULT_SEND_TIMEOUT_MS`](crate::consts::DEFAULT_SEND_TIMEOUT_MS).
    ///
    /// # Errors
    /// - [`ConfigError::TickRateTooLow`] below 150 ticks/ms
    /// - [`ConfigError::TickRateTooHigh`] when 11 ms of ticks overflows `u32`
    /// - [`ConfigError::TimeoutTooLong`] when the default timeout overflows `u32`;
    ///   use [`Timing::new_with_send_timeout`] at such rates
    pub fn new(ticks_per_ms: u32) -> Result<Self, ConfigError> {
        Self::new_with_send_timeout(ticks_per_ms, Some(DEFAULT_SEND_TIMEOUT_MS))
    }

    /// Like [`Timing::new`], with an explicit send timeout in ms (`None` for unbounded).
    ///
    /// # Errors
    /// Same as [`Timing::new`], with [`ConfigError::TimeoutTooLong`] reported
    /// for `timeout_ms`.
    pub fn new_with_send_timeout(
        ticks_per_ms: u32,
        timeout_ms: Option<u32>,
    ) -> Result<Self, ConfigError> {
        if ticks_per_ms < MIN_TICKS_PER_MS {
            return Err(ConfigError::TickRateTooLow(ticks_per_ms));
        }
        let inhibit_ticks = ticks_per_ms
            .checked_mul(INHIBIT_MS)
            .ok_or(ConfigError::TickRateTooHigh(ticks_per_ms))?;
        let hold_base = ticks_per_ms / HOLD_BASE_DIVISOR;
        let hold_assert_ticks = hold_base + HOLD_ASSERT_EXTRA_TICKS;
        let timing = Self {
            ticks_per_ms,
            debounce_ticks: ticks_per_ms / DEBOUNCE_DIVISOR,
            hold_assert_ticks,
            hold_release_ticks: hold_assert_ticks + HOLD_LOW_TICKS,
            inhibit_ticks,
            send_timeout_ticks: None,
        };
        timing.with_send_timeout(timeout_ms)
    }

    /// Replaces the send timeout.
    ///
    /// `None` lets a send wait forever for the device to clock it out, in which
    /// case "ready to send" never comes back if the device goes quiet.
    ///
    /// # Errors
    /// [`ConfigError::TimeoutTooLong`] when the timeout in ticks overflows `u32`.
    pub fn with_send_timeout(mut self, timeout_ms: Option<u32>) -> Result<Self, ConfigError> {
        self.send_timeout_ticks = match timeout_ms {
            Some(ms) => Some(
                self.ticks_per_ms
                    .checked_mul(ms)
                    .ok_or(ConfigError::TimeoutTooLong(ms))?,
            ),
            None => None,
        };
        Ok(self)
    }

    /// The configured rate.
    pub fn ticks_per_ms(&self) -> u32 {
        self.ticks_per_ms
    }

    /// Consecutive identical clock samples needed before the stable level changes.
    pub fn debounce_ticks(&self) -> u32 {
        self.debounce_ticks
    }

    /// Ticks spent in [`ClockHold::AssertingLow`](crate::hold::ClockHold::AssertingLow):
    /// 100 µs plus 50.
    pub fn hold_assert_ticks(&self) -> u32 {
        self.hold_assert_ticks
    }

    /// Tick count at which the clock hold is released (asserting + held-low phases).
    pub fn hold_release_ticks(&self) -> u32 {
        self.hold_release_ticks
    }

    /// Length of the post-send quiet interval (11 ms) in ticks.
    pub fn inhibit_ticks(&self) -> u32 {
        self.inhibit_ticks
    }

    /// Ticks a send may stay in flight before it is aborted, if bounded.
    pub fn send_timeout_ticks(&self) -> Option<u32> {
        self.send_timeout_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_derives_windows() {
        let timing = Timing::new(100_000).unwrap();
        assert_eq!(timing.debounce_ticks(), 666);
        assert_eq!(timing.hold_assert_ticks(), 10_050);
        assert_eq!(timing.hold_release_ticks(), 10_100);
        assert_eq!(timing.inhibit_ticks(), 1_100_000);
        assert_eq!(timing.send_timeout_ticks(), Some(2_000_000));
    }

    #[test]
    fn test_timing_minimum_rate() {
        let timing = Timing::new(150).unwrap();
        assert_eq!(timing.debounce_ticks(), 1);
        assert_eq!(timing.hold_assert_ticks(), 65);
        assert_eq!(timing.hold_release_ticks(), 115);
        assert_eq!(Timing::new(149), Err(ConfigError::TickRateTooLow(149)));
        assert_eq!(Timing::new(0), Err(ConfigError::TickRateTooLow(0)));
    }

    #[test]
    fn test_timing_rejects_overflow() {
        assert_eq!(
            Timing::new(u32::MAX / 10),
            Err(ConfigError::TickRateTooHigh(u32::MAX / 10))
        );
        // The default 20 ms timeout no longer fits at this rate.
        assert_eq!(
            Timing::new(u32::MAX / 11),
            Err(ConfigError::TimeoutTooLong(20))
        );
        let timing = Timing::new(u32::MAX / 20).unwrap().with_send_timeout(Some(21));
        assert_eq!(timing, Err(ConfigError::TimeoutTooLong(21)));
    }

    #[test]
    fn test_timing_high_rate_without_timeout() {
        let rate = u32::MAX / 11;
        let timing = Timing::new_with_send_timeout(rate, None).unwrap();
        assert_eq!(timing.inhibit_ticks(), rate * 11);
        assert_eq!(timing.send_timeout_ticks(), None);
        assert_eq!(
            Timing::new_with_send_timeout(rate, Some(2)),
            Err(ConfigError::TimeoutTooLong(2))
        );
        assert_eq!(
            Timing::new_with_send_timeout(1_000, Some(5)).unwrap(),
            Timing::new(1_000).unwrap().with_send_timeout(Some(5)).unwrap()
        );
    }

    #[test]
    fn test_timing_unbounded_send() {
        let timing = Timing::new(1_000).unwrap().with_send_timeout(None).unwrap();
        assert_eq!(timing.send_timeout_ticks(), None);
    }
}
