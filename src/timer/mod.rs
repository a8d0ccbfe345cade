//! Timer and tick-loop utilities for the PS/2 driver.
//!
//! Logic for setting up the tick source. This employs two approaches: an interrupt service
//! routine using `critical_section::with` (`timer-isr` feature), or a busy-loop delay timer
//! (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime OCR calculator
//! - `const_ocr_value`: compile-time OCR calculator
//! - `run_ps2_tick_loop`: blocking driver loop for `DelayNs` (feature `delay-loop`)
//! - `global_ps2_timer_tick` and `tick_ps2_timer!()`: interrupt-based tick callback wrapper
//! (feature `timer-isr`)
//!
//! The controller needs at least 150 ticks per millisecond (a tick every 6.67 µs or
//! faster) so the clock debounce window is at least one tick.
//!
//! Common settings for a 16 MHz AVR: (For use with `compute_ocr_value` and `const_ocr_value`)
//!
//! | PRESCALER | TIMER_COUNTS | Tick period | Ticks / ms |
//! |-----------|--------------|-------------|------------|
//! |         1 |           32 |        2 µs |        500 |
//! |         8 |            5 |      2.5 µs |        400 |
//! |         8 |           10 |        5 µs |        200 |
//! |         8 |           12 |        6 µs |        167 |

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// 1,000 microseconds = 1 millisecond
pub const MICROSECONDS_PER_MILLISECOND: f32 = 1_000.0;
/// 1,000,000 nanoseconds = 1 millisecond
pub const NANOSECONDS_PER_MILLISECOND: u32 = 1_000_000;
/// 1,000,000,000 nanoseconds = 1 second
pub const NANOSECONDS_PER_SECOND: u64 = 1_000_000_000;

/// Computes the OCR value for an AVR timer (CTC mode)
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 1, 8, 64)
/// - `tick_us`: desired tick interval in microseconds (e.g., 5.0)
///
/// # Returns
/// - OCR value for OCRnA (rounds to nearest integer)
/// - Number of ticks per millisecond (for building a [`Timing`](crate::timing::Timing))
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_us: f32) -> (u16, u32) {
    let counts_per_second = f_cpu as f64 / prescaler as f64;
    let counts_per_tick = counts_per_second * (tick_us as f64 / 1_000_000.0);
    (round(counts_per_tick) as u16, ticks_per_ms(tick_us))
}

/// Compile-time OCR value calculator
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 1, 8, 64)
/// - `tick_ns`: desired tick interval in nanoseconds (e.g., 5_000)
///
/// # Returns
/// - OCR value for OCRnA (truncated)
/// - Number of ticks per millisecond (for building a [`Timing`](crate::timing::Timing))
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, tick_ns: u32) -> (u16, u32) {
    let counts_per_tick = (f_cpu / prescaler) as u64 * tick_ns as u64 / NANOSECONDS_PER_SECOND;
    (counts_per_tick as u16, const_ticks_per_ms(tick_ns))
}

/// Compute ticks per millisecond
///
/// # Arguments
/// - `tick_us`: tick interval in microseconds (e.g., 5.0)
///
/// # Returns
/// - Number of ticks per millisecond, rounded to the nearest integer
pub fn ticks_per_ms(tick_us: f32) -> u32 {
    if tick_us <= 0.0 {
        return 0;
    }
    round((MICROSECONDS_PER_MILLISECOND / tick_us) as f64) as u32
}

/// Compile-time ticks per millisecond
///
/// # Arguments
/// - `tick_ns`: tick interval in nanoseconds (e.g., 5_000)
///
/// # Returns
/// - Number of ticks per millisecond (truncated); 0 for a zero interval
pub const fn const_ticks_per_ms(tick_ns: u32) -> u32 {
    if tick_ns == 0 {
        return 0;
    }
    NANOSECONDS_PER_MILLISECOND / tick_ns
}
