use spin::Once;

pub mod firmware_console;
pub mod mmio;
#[cfg(feature = "uart16550")]
pub mod ns16550;

pub trait DeviceDriver {
    fn init(&self);
}

#[cfg(feature = "uart16550")]
pub fn console() -> &'static (dyn crate::print::Write + Sync) {
    &ns16550::UART
}

#[cfg(all(
    not(feature = "uart16550"),
    target_arch = "riscv64",
    target_os = "none"
))]
pub fn console() -> &'static (dyn crate::print::Write + Sync) {
    &firmware_console::SBI_CONSOLE
}

// Host builds (unit tests) have nowhere to print to.
#[cfg(all(
    not(feature = "uart16550"),
    not(all(target_arch = "riscv64", target_os = "none"))
))]
pub fn console() -> &'static (dyn crate::print::Write + Sync) {
    struct NullConsole;

    impl crate::print::Write for NullConsole {
        fn write_fmt(&self, _args: core::fmt::Arguments) -> core::fmt::Result {
            Ok(())
        }
    }

    &NullConsole
}

#[cfg(feature = "uart16550")]
static DRIVERS: [&(dyn DeviceDriver + Sync); 1] = [&ns16550::UART];

#[cfg(not(feature = "uart16550"))]
static DRIVERS: [&(dyn DeviceDriver + Sync); 0] = [];

static INIT: Once<()> = Once::new();

/// Brings up the console device. Safe to call from every hart; only the
/// first caller touches the hardware.
pub fn init() {
    INIT.call_once(|| {
        for driver in DRIVERS.iter() {
            driver.init();
        }
    });
}
