//! Bit-level framing for both directions of the link.
//!
//! A frame is 11 bits clocked by the device: start (low), eight data bits LSB
//! first, an odd-parity bit and a stop bit (high). Both framers advance only on
//! frame ticks, i.e. falling edges of the debounced clock.
//!
//! - [`ReceiveFramer`] shifts a device-to-host frame in and validates its parity.
//! - [`TransmitFramer`] counts the device's clock pulses while the host is
//!   sending and says which bit belongs on the data line.

use crate::consts::{RX_PARITY_POS, RX_STOP_POS, TX_LAST_INDEX, TX_PARITY_INDEX};
use crate::controller::LineDrive;
use crate::parity::{odd_parity, parity_ok};

/// Device-to-host frame decoder.
///
/// Frame position 0 waits for a start bit, 1 to 8 collect data, 9 checks parity
/// and 10 is the stop bit. A bad parity bit never raises the valid flag, so the
/// byte is dropped without further notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceiveFramer {
    /// Data bits captured so far, LSB first.
    shift: u8,

    /// Position within the frame, 0 to 10.
    position: u8,

    /// Set by a matching parity bit, cleared by the following stop bit.
    parity_valid: bool,
}

impl ReceiveFramer {
    /// Creates an idle framer with an empty shift register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any partial frame.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current frame position (0 when idle).
    pub fn position(&self) -> u8 {
        self.position
    }

    /// The shift register. Holds the last received byte while
    /// [`parity_valid`](Self::parity_valid) is set.
    pub fn byte(&self) -> u8 {
        self.shift
    }

    /// Whether the frame in the shift register passed its parity check.
    pub fn parity_valid(&self) -> bool {
        self.parity_valid
    }

    /// Consumes the data line sample taken on one frame tick.
    pub fn clock(&mut self, data: bool) {
        match self.position {
            0 => {
                // A high line here is not a start bit; keep waiting.
                if !data {
                    self.position = 1;
                }
            }
            1..=8 => {
                let mask = 1 << (self.position - 1);
                if data {
                    self.shift |= mask;
                } else {
                    self.shift &= !mask;
                }
                self.position += 1;
            }
            RX_PARITY_POS => {
                self.parity_valid = parity_ok(self.shift, data);
                self.position = RX_STOP_POS;
            }
            _ => {
                self.position = 0;
                self.parity_valid = false;
            }
        }
    }
}

/// Host-to-device bit counter.
///
/// Once the clock hold is released the device generates the clock. Every
/// frame tick advances the bit index; the tick that finds it at 10 (the
/// device's acknowledge pulse) completes the send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransmitFramer {
    /// Frame ticks seen since the clock was released, 0 to 10.
    index: u8,

    /// One-tick completion pulse.
    done: bool,
}

impl TransmitFramer {
    /// Creates an idle counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index to 0 and drops any pending completion pulse.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current bit index.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Whether the send completed on the last tick.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Advances by one controller tick; `frame_tick` is set on a stable falling clock edge.
    ///
    /// Returns `true` on the tick the send completes.
    pub fn update(&mut self, frame_tick: bool) -> bool {
        self.done = false;
        if frame_tick {
            if self.index >= TX_LAST_INDEX {
                self.index = 0;
                self.done = true;
            } else {
                self.index += 1;
            }
        }
        self.done
    }

    /// Level the host should put on the data line for `byte` at the current index.
    ///
    /// The start bit is presented until the first device clock; after edge
    /// `i` the host presents data bit `i - 1`, then parity, then releases the
    /// line for the stop bit and the device's acknowledge.
    pub fn data_drive(&self, byte: u8) -> LineDrive {
        if self.done {
            return LineDrive::Release;
        }
        match self.index {
            0 => LineDrive::Low,
            i @ 1..=8 => LineDrive::from_level(byte & (1 << (i - 1)) != 0),
            TX_PARITY_INDEX => LineDrive::from_level(odd_parity(byte)),
            _ => LineDrive::Release,
        }
    }
}
