use crate::driver::Ps2Driver;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Runs a blocking loop that repeatedly calls `tick()` on the provided PS/2 driver.
///
/// This is a simple timing loop for use in environments where interrupts are unavailable
/// or undesired. It drives the controller's timing using a delay provider implementing
/// `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `driver`: A mutable reference to a `Ps2Driver` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `tick_ns`: The delay between each tick call, in nanoseconds (e.g. 5_000 for 200 ticks/ms).
///
/// # Example
/// ```rust,ignore
/// use ps2phy::timer::run_ps2_tick_loop;
/// let mut driver = Ps2Driver::new(clk, data, Timing::new(200).unwrap());
/// run_ps2_tick_loop(&mut driver, &mut delay, 5_000);
/// ```
///
/// # Notes
/// - This loop will never return; it is intended for single-purpose polling firmware.
/// - The time spent inside `tick()` adds to every period, so `tick_ns` should be trimmed
///   to keep the real rate at what the driver's `Timing` was built with.
/// - For more efficient or concurrent applications, prefer interrupt-driven tick scheduling.
pub fn run_ps2_tick_loop<D, CLK, DATA>(
    driver: &mut Ps2Driver<CLK, DATA>,
    delay: &mut D,
    tick_ns: u32,
) -> !
where
    D: DelayNs,
    CLK: InputPin + OutputPin,
    DATA: InputPin + OutputPin,
{
    loop {
        let _ = driver.tick();
        delay.delay_ns(tick_ns);
    }
}
