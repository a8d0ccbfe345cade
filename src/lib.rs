//! # ps2phy
//!
//! A portable, no_std Rust implementation of the host side of the two-wire PS/2
//! keyboard/mouse link, down to the bit timing.
//!
//! The link is open-drain and synchronous: one clock line, one data line. The
//! device normally generates the clock; the host takes it over briefly (the
//! inhibit sequence) whenever it wants to send. This crate implements:
//! - a clock-line debouncer that rejects glitches shorter than a fixed window
//! - an 11-bit frame decoder (start, 8 data bits LSB first, odd parity, stop)
//! - send arbitration with the mandatory 11 ms quiet interval between sends
//! - the host clock hold (≥100 µs) and the bit counter for host-to-device frames
//! - an `embedded-hal` driver on top, plus interrupt- and delay-based tick helpers
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for tick timing |
//! | `timer-isr` (default) | Uses `critical_section::with` for tick timing |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! The pure controller takes line samples and returns what to drive:
//!
//! ```rust
//! use ps2phy::controller::{LineInputs, Ps2Controller};
//! use ps2phy::timing::Timing;
//!
//! let mut ps2 = Ps2Controller::new(Timing::new(200).unwrap());
//! let out = ps2.tick(&LineInputs {
//!     clock: true, // sampled clock line
//!     data: true,  // sampled data line
//!     ..LineInputs::default()
//! });
//! assert!(out.ready_to_send);
//! ```
//!
//! Or wrap two open-drain pins in a [`driver::Ps2Driver`] and call `tick()` from
//! a timer interrupt:
//!
//! ```rust,ignore
//! let mut driver = Ps2Driver::new(clk, data, Timing::new(200).unwrap());
//! loop {
//!     driver.tick(); // Call every 5 µs
//! }
//! ```
//!
//! Or, use `run_ps2_tick_loop()` with a `DelayNs` implementation:
//!
//! ```rust,ignore
//! ps2phy::timer::run_ps2_tick_loop(&mut driver, &mut delay, 5_000);
//! ```
//!
//! ## Integration Notes
//!
//! - All durations are counted in ticks; the tick rate must be at least 150 ticks/ms
//! - Timing precision matters; hardware timer configuration is recommended
//! - Only one driver instance per static should be active in interrupt-driven mode
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

pub mod arbiter;
pub mod consts;
pub mod controller;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod frame;
pub mod hold;
pub(crate) mod parity;
pub mod timer;
pub mod timing;

pub use controller::{LineDrive, LineInputs, LineOutputs, Ps2Controller};
pub use driver::Ps2Driver;
pub use error::{ConfigError, SendError};
pub use timing::Timing;
