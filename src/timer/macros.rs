/// Declares a static global `PS2_DRIVER` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `PS2_DRIVER` suitable for use in
/// interrupt-based environments, where both the main thread and an ISR need
/// to safely access the shared driver state.
///
/// # Arguments
/// - `$clk`: The concrete type of the clock pin (must implement `InputPin + OutputPin`)
/// - `$data`: The concrete type of the data pin (must implement `InputPin + OutputPin`)
///
/// # Example
/// ```rust,ignore
/// init_ps2_driver!(MyClkPinType, MyDataPinType);
/// ```
#[macro_export]
macro_rules! init_ps2_driver {
    ( $clk:ty, $data:ty ) => {
        pub static PS2_DRIVER: $crate::timer::GlobalPs2Driver<$clk, $data> =
            $crate::timer::global_ps2_driver_init::<$clk, $data>();
    };
}

/// Initializes the global `PS2_DRIVER` singleton with a new driver instance.
///
/// This macro wraps construction of the `Ps2Driver` and stores it inside the
/// globally declared `PS2_DRIVER` created by `init_ps2_driver!`.
///
/// # Arguments
/// - `$clk`: The clock pin expression
/// - `$data`: The data pin expression
/// - `$timing`: A [`Timing`](crate::timing::Timing) matching the tick interrupt rate
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     setup_ps2_driver!(clk, data, Timing::new(200).unwrap());
/// }
/// ```
///
/// # Notes
/// - Must be called inside a critical section-aware context (safe in `main()`).
/// - Requires `init_ps2_driver!` to have been used earlier.
#[macro_export]
macro_rules! setup_ps2_driver {
    ( $clk:expr, $data:expr, $timing:expr ) => {
        $crate::timer::global_ps2_driver_setup(&PS2_DRIVER, $clk, $data, $timing)
    };
}

/// Calls `tick()` on the global `PS2_DRIVER` if it has been initialized.
///
/// This macro is intended to be invoked from a timer ISR or scheduler to
/// advance the PS/2 state machine at regular intervals.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     tick_ps2_timer!();
/// }
/// ```
///
/// # Notes
/// - This macro assumes `PS2_DRIVER` was declared with `init_ps2_driver!`
///   and initialized via `setup_ps2_driver!`.
/// - Safe to call repeatedly; it silently does nothing if the driver hasn't been set up yet.
#[macro_export]
macro_rules! tick_ps2_timer {
    () => {
        $crate::timer::global_ps2_timer_tick(&PS2_DRIVER)
    };
}
