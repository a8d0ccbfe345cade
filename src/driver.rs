//! PS/2 host driver for `embedded-hal` open-drain pins.
//!
//! This module provides the [`Ps2Driver`] struct, which connects a
//! [`Ps2Controller`] to a real clock and data line. Both pins must be
//! open-drain with a pull-up: `set_low()` pulls the line down and `set_high()`
//! releases it, and reading the pin returns the actual wire level.
//!
//! The driver works at any tick rate the controller accepts, provided that
//! [`tick()`](Ps2Driver::tick) is called at that rate, from a timer interrupt
//! (see [`crate::timer`]) or a polling loop.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use ps2phy::driver::Ps2Driver;
//! use ps2phy::timing::Timing;
//!
//! fn main() {
//!     # let clk = Pin::new(&[
//!     #     PinTransaction::set(PinState::High),
//!     #     PinTransaction::get(PinState::High),
//!     # ]);
//!     # let data = Pin::new(&[
//!     #     PinTransaction::set(PinState::High),
//!     #     PinTransaction::get(PinState::High),
//!     # ]);
//!     let mut driver = Ps2Driver::new(clk, data, Timing::new(1_500).unwrap());
//!
//!     loop {
//!         driver.tick(); // Called every 0.67 µs by a delay or timer interrupt
//!         if let Ok(byte) = driver.read() {
//!             // handle the byte
//!             # let _ = byte;
//!         }
//!         # break; // For testing purposes
//!     }
//!     # driver.clk.done();
//!     # driver.data.done();
//! }
//! ```
//!
//! ## Design Notes
//!
//! The driver adds buffering and bookkeeping only; all bit timing lives in
//! [`Ps2Controller`]. Host commands (`send`, `enable`, `disable`, `reset`) are
//! queued and take effect on the next tick, so they are safe to call from
//! outside the tick context as long as access is serialized.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Deque;

use crate::consts::RX_FIFO_LEN;
use crate::controller::{LineDrive, LineInputs, LineOutputs, Ps2Controller};
use crate::error::SendError;
use crate::timing::Timing;

/// A PS/2 host port on two open-drain pins.
///
/// ## Type Parameters
///
/// - `CLK`: clock pin, readable and drivable
/// - `DATA`: data pin, readable and drivable
///
/// ## Notes
///
/// - Received bytes are queued in a FIFO of
///   [`RX_FIFO_LEN`](crate::consts::RX_FIFO_LEN) entries; bytes arriving
///   while it is full are dropped and counted in `rx_overruns`.
/// - Pin read errors are treated as an idle (high) line and write errors are
///   ignored; the tick path never fails.
#[derive(Debug)]
pub struct Ps2Driver<CLK, DATA>
where
    CLK: InputPin + OutputPin,
    DATA: InputPin + OutputPin,
{
    /// Clock pin
    pub clk: CLK,
    /// Data pin
    pub data: DATA,
    /// [`Ps2Controller`] instance
    pub controller: Ps2Controller,
    enabled: bool,
    pending_reset: bool,
    pending_send: Option<u8>,
    clock_drive: LineDrive,
    data_drive: LineDrive,
    byte_seen: bool,
    rx_fifo: Deque<u8, RX_FIFO_LEN>,

    /// Frames received with good parity.
    pub rx_good: u16,

    /// Good frames dropped because the receive FIFO was full.
    pub rx_overruns: u16,

    /// Sends the device clocked out completely.
    pub tx_good: u16,

    /// Sends given up on after the send timeout.
    pub tx_aborted: u16,
}

impl<CLK, DATA> Ps2Driver<CLK, DATA>
where
    CLK: InputPin + OutputPin,
    DATA: InputPin + OutputPin,
{
    /// Creates a new driver and releases both lines.
    ///
    /// # Arguments
    /// - `clk`: open-drain clock pin
    /// - `data`: open-drain data pin
    /// - `timing`: tick rate the driver will be ticked at
    pub fn new(clk: CLK, data: DATA, timing: Timing) -> Self {
        let mut clk = clk;
        let mut data = data;
        let _ = clk.set_high();
        let _ = data.set_high();
        Self {
            clk,
            data,
            controller: Ps2Controller::new(timing),
            enabled: true,
            pending_reset: false,
            pending_send: None,
            clock_drive: LineDrive::Release,
            data_drive: LineDrive::Release,
            byte_seen: false,
            rx_fifo: Deque::new(),
            rx_good: 0,
            rx_overruns: 0,
            tx_good: 0,
            tx_aborted: 0,
        }
    }

    /// Starts (or resumes) driving the port on the next tick.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Releases both lines and stops any send from progressing on the next tick.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Resets the controller on the next tick, cancelling any transfer and
    /// emptying the receive FIFO.
    pub fn reset(&mut self) {
        self.pending_reset = true;
        self.pending_send = None;
    }

    /// Whether [`send()`](Self::send) would currently accept a byte.
    pub fn ready(&self) -> bool {
        self.enabled && self.pending_send.is_none() && self.controller.outputs().ready_to_send
    }

    /// Queues `byte` to be sent to the device, starting on the next tick.
    ///
    /// # Errors
    /// - [`SendError::Disabled`] if the port is disabled
    /// - [`SendError::NotReady`] while a send is in flight or the post-send
    ///   quiet interval is still running
    pub fn send(&mut self, byte: u8) -> Result<(), SendError> {
        if !self.enabled {
            return Err(SendError::Disabled);
        }
        if !self.ready() {
            return Err(SendError::NotReady);
        }
        self.pending_send = Some(byte);
        Ok(())
    }

    /// Returns `WouldBlock` until the port is ready for another send.
    ///
    /// Pair with `nb::block!` to spin on it between ticks driven by an interrupt.
    pub fn wait_ready(&self) -> nb::Result<(), Infallible> {
        if self.ready() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Takes the oldest received byte.
    pub fn read(&mut self) -> nb::Result<u8, Infallible> {
        self.rx_fifo.pop_front().ok_or(nb::Error::WouldBlock)
    }

    /// Number of bytes waiting in the receive FIFO.
    pub fn available(&self) -> usize {
        self.rx_fifo.len()
    }

    /// Samples the lines, advances the controller by one tick and updates the
    /// line drives.
    ///
    /// # Timing
    /// Must be called at exactly the rate given to [`Timing::new`].
    pub fn tick(&mut self) -> LineOutputs {
        let clock = self.clk.is_high().unwrap_or(true);
        let data = self.data.is_high().unwrap_or(true);

        let reset = core::mem::take(&mut self.pending_reset);
        let (send_request, host_byte) = match self.pending_send.take() {
            Some(byte) => (true, byte),
            None => (false, 0),
        };

        let out = self.controller.tick(&LineInputs {
            enable: self.enabled,
            reset,
            clock,
            data,
            send_request,
            host_byte,
        });

        if reset {
            self.rx_fifo.clear();
        }
        self.collect(&out);
        self.drive(&out);
        out
    }

    fn collect(&mut self, out: &LineOutputs) {
        if out.byte_received && !self.byte_seen {
            self.rx_good = self.rx_good.wrapping_add(1);
            trace!("ps2: received {:#x}", out.received_byte);
            if self.rx_fifo.push_back(out.received_byte).is_err() {
                self.rx_overruns = self.rx_overruns.wrapping_add(1);
                warn!("ps2: receive fifo full, dropped {:#x}", out.received_byte);
            }
        }
        self.byte_seen = out.byte_received;

        if out.send_complete {
            self.tx_good = self.tx_good.wrapping_add(1);
            debug!("ps2: sent {:#x}", self.controller.arbiter().host_byte());
        }
        if out.send_aborted {
            self.tx_aborted = self.tx_aborted.wrapping_add(1);
            warn!(
                "ps2: send of {:#x} timed out",
                self.controller.arbiter().host_byte()
            );
        }
    }

    fn drive(&mut self, out: &LineOutputs) {
        if out.clock_drive != self.clock_drive {
            self.clock_drive = out.clock_drive;
            let _ = match out.clock_drive {
                LineDrive::Release => self.clk.set_high(),
                LineDrive::Low => self.clk.set_low(),
            };
        }
        if out.data_drive != self.data_drive {
            self.data_drive = out.data_drive;
            let _ = match out.data_drive {
                LineDrive::Release => self.data.set_high(),
                LineDrive::Low => self.data.set_low(),
            };
        }
    }
}
