//! Host inhibit sequence on the clock line.
//!
//! Before a host-to-device transfer the host must pull the clock low for at
//! least 100 µs. The sequencer runs purely on tick counts and never waits for
//! the device: it asserts the clock, keeps it held while the start bit goes
//! onto the data line, then lets go.

use crate::controller::LineDrive;
use crate::timing::Timing;

/// Phase of the host's clock hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ClockHold {
    /// The host is not touching the clock line.
    #[default]
    Released,
    /// The host is pulling the clock low; lasts 100 µs plus 50 ticks.
    AssertingLow,
    /// Clock still low while the data line carries the start bit; lasts 50 ticks.
    HeldLow,
}

/// Tick counter driving [`ClockHold`] during a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockHoldSequencer {
    /// Ticks since the send request, saturating at `release_ticks`.
    counter: u32,
    state: ClockHold,
    assert_ticks: u32,
    release_ticks: u32,
}

impl ClockHoldSequencer {
    /// Creates a released sequencer using the windows in `timing`.
    pub fn new(timing: &Timing) -> Self {
        Self {
            counter: 0,
            state: ClockHold::Released,
            assert_ticks: timing.hold_assert_ticks(),
            release_ticks: timing.hold_release_ticks(),
        }
    }

    /// Current phase.
    pub fn state(&self) -> ClockHold {
        self.state
    }

    /// Ticks counted since the sequence started.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Lets go of the clock and zeroes the counter.
    pub fn release(&mut self) {
        self.counter = 0;
        self.state = ClockHold::Released;
    }

    /// Starts a new sequence; this tick is tick 0 of the asserting phase.
    pub fn start(&mut self) {
        self.counter = 0;
        self.state = self.phase();
    }

    /// Counts one more tick of an ongoing send.
    pub fn advance(&mut self) {
        self.counter = self.counter.saturating_add(1).min(self.release_ticks);
        self.state = self.phase();
    }

    /// What the host should do with the clock line.
    pub fn clock_drive(&self) -> LineDrive {
        match self.state {
            ClockHold::Released => LineDrive::Release,
            ClockHold::AssertingLow | ClockHold::HeldLow => LineDrive::Low,
        }
    }

    fn phase(&self) -> ClockHold {
        if self.counter < self.assert_ticks {
            ClockHold::AssertingLow
        } else if self.counter < self.release_ticks {
            ClockHold::HeldLow
        } else {
            ClockHold::Released
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_phases_follow_tick_count() {
        for rate in [150, 1_000, 1_500, 10_000] {
            let timing = Timing::new(rate).unwrap();
            let t = rate / 10;
            let mut hold = ClockHoldSequencer::new(&timing);
            assert_eq!(hold.state(), ClockHold::Released);

            hold.start();
            for tick in 0..(t + 150) {
                let expected = if tick < t + 50 {
                    ClockHold::AssertingLow
                } else if tick < t + 100 {
                    ClockHold::HeldLow
                } else {
                    ClockHold::Released
                };
                assert_eq!(hold.state(), expected, "rate {rate} tick {tick}");
                hold.advance();
            }
            assert_eq!(hold.counter(), t + 100);
        }
    }

    #[test]
    fn test_hold_release_resets_counter() {
        let timing = Timing::new(150).unwrap();
        let mut hold = ClockHoldSequencer::new(&timing);
        hold.start();
        for _ in 0..70 {
            hold.advance();
        }
        assert_eq!(hold.state(), ClockHold::HeldLow);
        assert_eq!(hold.clock_drive(), LineDrive::Low);
        hold.release();
        assert_eq!(hold.counter(), 0);
        assert_eq!(hold.state(), ClockHold::Released);
        assert_eq!(hold.clock_drive(), LineDrive::Release);
    }
}
