//! Send arbitration and the post-send quiet interval.
//!
//! A rising edge on the host's send-request input latches the request and the
//! byte to send. The latch holds until the transmit framer reports completion,
//! the send times out, or the controller is reset. "Ready to send" stays low
//! while a send is in flight and for the 11 ms inhibit interval after it ends.

use crate::timing::Timing;

/// Request latch, host output byte and inhibit countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendArbiter {
    /// A send is in flight.
    active: bool,

    /// Byte captured at the request edge.
    host_byte: u8,

    /// Ticks left before "ready to send" may reassert.
    countdown: u32,

    /// Send-request level seen on the previous tick, for edge detection.
    last_request: bool,

    /// Ticks since the current send was requested.
    elapsed: u32,

    /// One-tick pulse raised when a send is given up on.
    aborted: bool,

    inhibit_ticks: u32,
    timeout_ticks: Option<u32>,
}

impl SendArbiter {
    /// Creates an idle arbiter that is immediately ready to send.
    pub fn new(timing: &Timing) -> Self {
        Self {
            active: false,
            host_byte: 0,
            countdown: 0,
            last_request: false,
            elapsed: 0,
            aborted: false,
            inhibit_ticks: timing.inhibit_ticks(),
            timeout_ticks: timing.send_timeout_ticks(),
        }
    }

    /// Clears the latch, the byte and the countdown.
    ///
    /// `request` is the current request level, remembered so that a request
    /// held high across the reset does not start a send afterwards.
    pub fn reset(&mut self, request: bool) {
        self.active = false;
        self.host_byte = 0;
        self.countdown = 0;
        self.last_request = request;
        self.elapsed = 0;
        self.aborted = false;
    }

    /// Whether a send is in flight.
    pub fn active(&self) -> bool {
        self.active
    }

    /// The byte latched by the last accepted request.
    pub fn host_byte(&self) -> u8 {
        self.host_byte
    }

    /// Ticks left in the inhibit interval.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Whether the send was aborted on the last tick.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Whether the host may start a new send.
    pub fn ready(&self) -> bool {
        !self.active && self.countdown == 0
    }

    /// Advances by one tick.
    ///
    /// # Arguments
    /// - `request`: current send-request level; only its rising edge matters
    /// - `byte`: host output byte, captured on that edge
    /// - `completed`: the transmit framer finished the frame on the previous tick
    ///
    /// # Returns
    /// `true` when a new send was accepted on this tick.
    pub fn update(&mut self, request: bool, byte: u8, completed: bool) -> bool {
        let was_active = self.active;
        let accepted = request && !self.last_request;
        self.last_request = request;
        self.aborted = false;

        if accepted {
            self.active = true;
            self.host_byte = byte;
            self.elapsed = 0;
        } else if was_active {
            if completed {
                self.active = false;
            } else {
                self.elapsed = self.elapsed.saturating_add(1);
                if let Some(limit) = self.timeout_ticks {
                    if self.elapsed >= limit {
                        self.active = false;
                        self.aborted = true;
                    }
                }
            }
        }

        // The countdown reloads for as long as a send was in flight at the start
        // of this tick, so it only starts running once the send has ended.
        self.countdown = if was_active || self.active {
            self.inhibit_ticks
        } else {
            self.countdown.saturating_sub(1)
        };
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbiter(rate: u32, timeout_ms: Option<u32>) -> SendArbiter {
        let timing = Timing::new(rate)
            .unwrap()
            .with_send_timeout(timeout_ms)
            .unwrap();
        SendArbiter::new(&timing)
    }

    #[test]
    fn test_arbiter_starts_ready() {
        let arb = arbiter(150, None);
        assert!(arb.ready());
        assert!(!arb.active());
        assert_eq!(arb.countdown(), 0);
    }

    #[test]
    fn test_arbiter_latches_on_rising_edge_only() {
        let mut arb = arbiter(150, None);
        assert!(arb.update(true, 0xed, false));
        assert!(!arb.ready());
        assert_eq!(arb.host_byte(), 0xed);
        // Held high: no second edge, byte stays.
        assert!(!arb.update(true, 0x00, false));
        assert_eq!(arb.host_byte(), 0xed);
        assert!(!arb.update(false, 0x00, false));
        assert!(arb.active());
    }

    #[test]
    fn test_arbiter_inhibit_after_completion() {
        let mut arb = arbiter(150, None);
        let inhibit = 150 * 11;
        let _ = arb.update(true, 0xf4, false);
        for _ in 0..20 {
            let _ = arb.update(false, 0, false);
        }
        // Completion reported on the previous tick clears the latch now.
        let _ = arb.update(false, 0, true);
        assert!(!arb.active());
        assert_eq!(arb.countdown(), inhibit);
        for _ in 1..inhibit {
            let _ = arb.update(false, 0, false);
            assert!(!arb.ready());
        }
        let _ = arb.update(false, 0, false);
        assert!(arb.ready());
    }

    #[test]
    fn test_arbiter_times_out() {
        let mut arb = arbiter(150, Some(1));
        let _ = arb.update(true, 0xff, false);
        for _ in 1..150 {
            let _ = arb.update(false, 0, false);
            assert!(arb.active());
            assert!(!arb.aborted());
        }
        let _ = arb.update(false, 0, false);
        assert!(!arb.active());
        assert!(arb.aborted());
        assert!(!arb.ready());
        let _ = arb.update(false, 0, false);
        assert!(!arb.aborted());
    }

    #[test]
    fn test_arbiter_reset_ignores_held_request() {
        let mut arb = arbiter(150, None);
        let _ = arb.update(true, 0x12, false);
        arb.reset(true);
        assert!(arb.ready());
        assert_eq!(arb.host_byte(), 0);
        assert!(!arb.update(true, 0x34, false));
        assert!(arb.ready());
    }
}
