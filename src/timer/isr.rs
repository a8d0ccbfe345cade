use crate::driver::Ps2Driver;
use crate::timing::Timing;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::{InputPin, OutputPin};

/// A `Ps2Driver` slot shared between the main thread and a timer interrupt.
pub type GlobalPs2Driver<CLK, DATA> = Mutex<RefCell<Option<Ps2Driver<CLK, DATA>>>>;

/// Used to initialize the global static `Ps2Driver` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use ps2phy::timer::{GlobalPs2Driver, global_ps2_driver_init};
/// use some_hal::{PD2, PD3};
///
/// static PS2_DRIVER: GlobalPs2Driver<PD2, PD3> = global_ps2_driver_init::<PD2, PD3>();
/// ```
pub const fn global_ps2_driver_init<CLK, DATA>() -> GlobalPs2Driver<CLK, DATA>
where
    CLK: InputPin + OutputPin,
    DATA: InputPin + OutputPin,
{
    Mutex::new(RefCell::new(None))
}

/// Builds a `Ps2Driver` inside the global slot.
///
/// # Arguments
/// * The global static `Ps2Driver`
/// * The clock pin
/// * The data pin
/// * The [`Timing`] matching the interrupt rate, e.g. for a 5 µs timer interrupt
///   `Timing::new(const_ticks_per_ms(5_000))`
///# Example
/// ```rust,ignore
/// fn main() {
///     global_ps2_driver_setup(&PS2_DRIVER, clk, data, timing);
/// }
/// ```
pub fn global_ps2_driver_setup<CLK, DATA>(
    global_driver: &'static GlobalPs2Driver<CLK, DATA>,
    clk: CLK,
    data: DATA,
    timing: Timing,
) where
    CLK: InputPin + OutputPin,
    DATA: InputPin + OutputPin,
{
    critical_section::with(|cs| {
        let _ = global_driver
            .borrow(cs)
            .replace(Some(Ps2Driver::new(clk, data, timing)));
    });
}

/// Runs the tick at each interrupt
///
/// # Arguments
/// * The global static `Ps2Driver`
///# Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     global_ps2_timer_tick(&PS2_DRIVER);
/// }
/// ```
pub fn global_ps2_timer_tick<CLK, DATA>(global_driver: &'static GlobalPs2Driver<CLK, DATA>)
where
    CLK: InputPin + OutputPin,
    DATA: InputPin + OutputPin,
{
    critical_section::with(|cs| {
        if let Some(driver) = global_driver.borrow(cs).borrow_mut().as_mut() {
            let _ = driver.tick();
        }
    });
}

/// Runs `f` against the global driver from thread context, e.g. to send or read.
///
/// # Returns
/// `None` if the driver has not been set up yet, otherwise the closure's result.
///
///# Example
/// ```rust,ignore
/// let byte = with_global_ps2_driver(&PS2_DRIVER, |ps2| ps2.read().ok()).flatten();
/// ```
pub fn with_global_ps2_driver<CLK, DATA, R>(
    global_driver: &'static GlobalPs2Driver<CLK, DATA>,
    f: impl FnOnce(&mut Ps2Driver<CLK, DATA>) -> R,
) -> Option<R>
where
    CLK: InputPin + OutputPin,
    DATA: InputPin + OutputPin,
{
    critical_section::with(|cs| global_driver.borrow(cs).borrow_mut().as_mut().map(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    static PS2_DRIVER: GlobalPs2Driver<PinMock, PinMock> =
        global_ps2_driver_init::<PinMock, PinMock>();

    #[test]
    fn test_global_driver_lifecycle() {
        // Ticking before setup is a no-op.
        global_ps2_timer_tick(&PS2_DRIVER);
        assert_eq!(with_global_ps2_driver(&PS2_DRIVER, |ps2| ps2.ready()), None);

        let clk = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::get(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let data = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::get(PinState::High),
        ]);
        global_ps2_driver_setup(&PS2_DRIVER, clk, data, Timing::new(150).unwrap());

        let sent = with_global_ps2_driver(&PS2_DRIVER, |ps2| ps2.send(0xff));
        assert_eq!(sent, Some(Ok(())));
        global_ps2_timer_tick(&PS2_DRIVER);
        assert_eq!(
            with_global_ps2_driver(&PS2_DRIVER, |ps2| ps2.ready()),
            Some(false)
        );

        let driver = critical_section::with(|cs| PS2_DRIVER.borrow(cs).take());
        let mut driver = driver.unwrap();
        driver.clk.done();
        driver.data.done();
    }
}
