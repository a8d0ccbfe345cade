//! Error types for configuration and the host-side send API.
//!
//! The per-tick path never fails: a bad frame or a lost send shows up as a
//! signal that never asserts. Errors only exist where a caller hands the crate
//! something it cannot honour.

use thiserror::Error;

/// Rejected [`Timing`](crate::timing::Timing) parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ConfigError {
    /// The tick rate leaves no room for a debounce window (`ticks_per_ms / 150 == 0`).
    #[error("tick rate of {0} ticks/ms is below the 150 ticks/ms minimum")]
    TickRateTooLow(u32),
    /// The 11 ms inhibit interval does not fit a 32-bit tick counter at this rate.
    #[error("tick rate of {0} ticks/ms overflows the inhibit counter")]
    TickRateTooHigh(u32),
    /// The send timeout does not fit a 32-bit tick counter at the configured rate.
    #[error("send timeout of {0} ms overflows the tick counter")]
    TimeoutTooLong(u32),
}

/// Reasons a [`Ps2Driver::send`](crate::driver::Ps2Driver::send) request was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum SendError {
    /// A send is in flight or the post-send quiet interval has not elapsed.
    #[error("controller is not ready to send")]
    NotReady,
    /// The controller is disabled and would never release the clock.
    #[error("controller is disabled")]
    Disabled,
}
