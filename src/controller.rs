//! The composite PS/2 host bit-timing controller.
//!
//! [`Ps2Controller`] owns every piece of protocol state and is advanced once per
//! tick by [`tick()`](Ps2Controller::tick). It has no pins of its own: the
//! caller samples the clock and data lines, passes them in as [`LineInputs`],
//! and applies the [`LineDrive`] requests found in the returned [`LineOutputs`].
//! [`Ps2Driver`](crate::driver::Ps2Driver) does exactly that for `embedded-hal` pins.
//!
//! ## Evaluation order
//!
//! Each tick runs a fixed pipeline over a copy of the committed state:
//!
//! 1. clock debounce and falling-edge detection
//! 2. receive framing
//! 3. send arbitration and the inhibit countdown
//! 4. clock hold sequencing
//! 5. transmit bit counting
//!
//! A stage reads the state as it stood at the end of the previous tick, plus
//! the results of the stages before it on this tick. The new state is committed
//! in one assignment, so no stage ever observes a half-updated neighbour.
//!
//! ## Example
//!
//! ```rust
//! use ps2phy::controller::{LineInputs, Ps2Controller};
//! use ps2phy::timing::Timing;
//!
//! let mut ps2 = Ps2Controller::new(Timing::new(1_500).unwrap());
//! let out = ps2.tick(&LineInputs::default());
//! assert!(out.ready_to_send);
//! assert!(!out.byte_received);
//! ```

use crate::arbiter::SendArbiter;
use crate::debounce::{Edge, EdgeDebouncer};
use crate::frame::{ReceiveFramer, TransmitFramer};
use crate::hold::{ClockHold, ClockHoldSequencer};
use crate::timing::Timing;

/// Which sub-state-machine currently owns the link.
///
/// Receiving and sending are mutually exclusive: while `Sending`, the receive
/// framer is held in reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ControllerMode {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A device-to-host frame is partially shifted in.
    Receiving,
    /// A host-to-device send is latched.
    Sending,
}

/// What the host should do with an open-drain line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum LineDrive {
    /// Let the line float; the pull-up (or the device) decides its level.
    #[default]
    Release,
    /// Pull the line low.
    Low,
}

impl LineDrive {
    /// `Release` for a high bit, `Low` for a low bit.
    pub fn from_level(high: bool) -> Self {
        if high {
            LineDrive::Release
        } else {
            LineDrive::Low
        }
    }
}

/// Everything sampled from the outside world on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct LineInputs {
    /// Controller enable. Disabling releases the clock hold and stops the
    /// transmit counter; received data is kept but not reported.
    pub enable: bool,
    /// Synchronous reset; overrides everything else on the tick it is seen.
    pub reset: bool,
    /// Raw clock line sample, `true` = high/released.
    pub clock: bool,
    /// Raw data line sample, `true` = high/released.
    pub data: bool,
    /// Send-request level; a send starts on its rising edge.
    pub send_request: bool,
    /// Byte to send, captured on the send-request edge.
    pub host_byte: u8,
}

impl Default for LineInputs {
    /// Enabled, not in reset, both lines idle high, no request.
    fn default() -> Self {
        Self {
            enable: true,
            reset: false,
            clock: true,
            data: true,
            send_request: false,
            host_byte: 0,
        }
    }
}

/// The controller's outputs after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct LineOutputs {
    /// The host may request a new send.
    pub ready_to_send: bool,
    /// A parity-checked byte is available in `received_byte`. Stays set from
    /// the parity bit until the stop bit.
    pub byte_received: bool,
    /// Last shifted-in byte; only meaningful while `byte_received` is set.
    pub received_byte: u8,
    /// One-tick pulse: the device clocked out the whole host frame.
    pub send_complete: bool,
    /// One-tick pulse: the send timed out and was dropped.
    pub send_aborted: bool,
    /// Transmit bit counter, 0 to 10, advanced on each falling clock edge of a
    /// host send. It is one ahead of the bit on the wire: index `i` in 1..=8
    /// presents data bit `i - 1`, 9 presents parity and 10 is the stop slot.
    pub bit_index: u8,
    /// Phase of the host clock hold.
    pub clock_hold: ClockHold,
    /// Current owner of the link.
    pub mode: ControllerMode,
    /// Requested state of the clock line.
    pub clock_drive: LineDrive,
    /// Requested state of the data line.
    pub data_drive: LineDrive,
}

/// Tick-driven PS/2 host controller.
///
/// Cheap to copy; every field is plain data. Each instance is fully
/// independent, so one controller per port is all that is needed for several
/// devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ps2Controller {
    timing: Timing,
    debouncer: EdgeDebouncer,
    receiver: ReceiveFramer,
    arbiter: SendArbiter,
    hold: ClockHoldSequencer,
    transmitter: TransmitFramer,
    mode: ControllerMode,
    enabled: bool,
}

impl Ps2Controller {
    /// Creates an enabled, idle controller.
    ///
    /// # Arguments
    /// - `timing`: tick rate and derived windows; fixed for the controller's lifetime
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            debouncer: EdgeDebouncer::new(timing.debounce_ticks()),
            receiver: ReceiveFramer::new(),
            arbiter: SendArbiter::new(&timing),
            hold: ClockHoldSequencer::new(&timing),
            transmitter: TransmitFramer::new(),
            mode: ControllerMode::Idle,
            enabled: true,
        }
    }

    /// The timing this controller was built with.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Current link owner.
    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    /// The clock debouncer.
    pub fn debouncer(&self) -> &EdgeDebouncer {
        &self.debouncer
    }

    /// The receive framer.
    pub fn receiver(&self) -> &ReceiveFramer {
        &self.receiver
    }

    /// The send arbiter.
    pub fn arbiter(&self) -> &SendArbiter {
        &self.arbiter
    }

    /// The clock hold sequencer.
    pub fn hold(&self) -> &ClockHoldSequencer {
        &self.hold
    }

    /// The transmit bit counter.
    pub fn transmitter(&self) -> &TransmitFramer {
        &self.transmitter
    }

    /// Returns every entity to its initial value, cancelling any receive or send.
    ///
    /// `send_request` is the current request level. A request held high
    /// through the reset only starts a send after it falls and rises again.
    pub fn reset(&mut self, send_request: bool) {
        let enabled = self.enabled;
        *self = Self::new(self.timing);
        self.enabled = enabled;
        self.arbiter.reset(send_request);
    }

    /// Advances the controller by one tick.
    ///
    /// Must be called at the rate given to [`Timing::new`]. See the
    /// [module documentation](self) for the evaluation order.
    pub fn tick(&mut self, inputs: &LineInputs) -> LineOutputs {
        if inputs.reset {
            self.reset(inputs.send_request);
            self.enabled = inputs.enable;
            return self.outputs();
        }

        let snapshot = *self;
        let mut next = snapshot;
        next.enabled = inputs.enable;

        let frame_tick = next.debouncer.update(inputs.clock) == Some(Edge::Falling);

        if snapshot.mode == ControllerMode::Sending {
            next.receiver.reset();
        } else if frame_tick {
            next.receiver.clock(inputs.data);
        }

        let accepted = next.arbiter.update(
            inputs.send_request,
            inputs.host_byte,
            snapshot.transmitter.done(),
        );

        if !inputs.enable || !next.arbiter.active() {
            next.hold.release();
        } else if accepted {
            next.hold.start();
        } else {
            next.hold.advance();
        }

        let transmitting = inputs.enable
            && next.arbiter.active()
            && !accepted
            && next.hold.state() == ClockHold::Released;
        if transmitting {
            let _ = next.transmitter.update(frame_tick);
        } else {
            next.transmitter.reset();
        }

        next.mode = if next.arbiter.active() {
            ControllerMode::Sending
        } else if next.receiver.position() != 0 {
            ControllerMode::Receiving
        } else {
            ControllerMode::Idle
        };

        *self = next;
        self.outputs()
    }

    /// Outputs for the committed state, as returned by the last [`tick()`](Self::tick).
    pub fn outputs(&self) -> LineOutputs {
        let sending = self.enabled && self.arbiter.active();
        let data_drive = if !sending {
            LineDrive::Release
        } else {
            match self.hold.state() {
                ClockHold::AssertingLow => LineDrive::Release,
                ClockHold::HeldLow => LineDrive::Low,
                ClockHold::Released => self.transmitter.data_drive(self.arbiter.host_byte()),
            }
        };

        LineOutputs {
            ready_to_send: self.arbiter.ready(),
            byte_received: self.enabled && self.receiver.parity_valid(),
            received_byte: self.receiver.byte(),
            send_complete: self.transmitter.done(),
            send_aborted: self.arbiter.aborted(),
            bit_index: self.transmitter.index(),
            clock_hold: self.hold.state(),
            mode: self.mode,
            clock_drive: self.hold.clock_drive(),
            data_drive,
        }
    }
}
