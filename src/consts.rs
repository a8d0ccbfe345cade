//! Constants used across the PS/2 bit-timing implementation.
//!
//! Every duration in this crate is counted in ticks of an external periodic
//! driver. The tick rate is configured in ticks per millisecond (see
//! [`Timing`](crate::timing::Timing)); the divisors and multipliers below turn
//! that rate into the protocol's fixed windows.
//!
//! ## Key Concepts
//!
//! - **Frame**: 11 clocked bits, start + 8 data (LSB first) + odd parity + stop.
//! - **Debounce window**: `ticks_per_ms / DEBOUNCE_DIVISOR` consecutive samples
//!   before the stable clock level may change.
//! - **Inhibit sequence**: the host holds the clock low for at least 100 µs
//!   before releasing it to the device.
//! - **Ready interval**: 11 ms of quiet after every send before the host may send again.

/// Divisor applied to the tick rate to get the clock debounce window in ticks.
///
/// At 150 ticks/ms the window is a single tick; below that it would be zero and
/// no filtering would happen, so such rates are rejected.
pub const DEBOUNCE_DIVISOR: u32 = 150;

/// Divisor applied to the tick rate to get 100 µs worth of ticks.
pub const HOLD_BASE_DIVISOR: u32 = 10;

/// Extra ticks added to the 100 µs base during which the clock is being asserted low.
pub const HOLD_ASSERT_EXTRA_TICKS: u32 = 50;

/// Ticks the clock stays held low (with the data line pulled for the start bit)
/// after the asserting phase, before it is released.
pub const HOLD_LOW_TICKS: u32 = 50;

/// Length of the post-send quiet interval, in milliseconds.
pub const INHIBIT_MS: u32 = 11;

/// Default bound on how long a host send may stay in flight, in milliseconds.
///
/// A device must start clocking within 15 ms of the clock release and finish
/// the frame within 2 ms; anything slower than this is treated as lost.
pub const DEFAULT_SEND_TIMEOUT_MS: u32 = 20;

/// The lowest tick rate (ticks per millisecond) that yields a non-zero debounce window.
pub const MIN_TICKS_PER_MS: u32 = DEBOUNCE_DIVISOR;

/// Number of bits in a frame: start, 8 data, parity, stop.
pub const FRAME_BITS: u8 = 11;

/// Frame position of the parity bit while receiving.
pub const RX_PARITY_POS: u8 = 9;

/// Frame position of the stop bit while receiving.
pub const RX_STOP_POS: u8 = 10;

/// Transmit bit index at which the host presents the odd-parity bit.
///
/// The host changes the data line after each device falling edge, so after
/// edge `i` (index `i`) it presents the bit the device samples on pulse `i + 1`:
/// data bit `i - 1` for indices 1 to 8, parity at 9.
pub const TX_PARITY_INDEX: u8 = 9;

/// Transmit bit index at which the host releases the data line for the stop bit.
pub const TX_STOP_INDEX: u8 = 10;

/// Last transmit bit index; the frame tick that finds the index here completes the send.
pub const TX_LAST_INDEX: u8 = 10;

/// Capacity of the receive FIFO kept by [`Ps2Driver`](crate::driver::Ps2Driver).
pub const RX_FIFO_LEN: usize = 16;
