use core::fmt;

use spin::Mutex;

use crate::{print, sbi::Firmware};

/// Console on top of the firmware's putchar call.
pub struct FirmwareConsole<'a, F: Firmware> {
    firmware: &'a F,
    lock: Mutex<()>,
}

struct Writer<'a, F: Firmware>(&'a F);

impl<'a, F: Firmware> fmt::Write for Writer<'a, F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            self.0.console_putchar(c);
        }
        Ok(())
    }
}

impl<'a, F: Firmware> FirmwareConsole<'a, F> {
    pub const fn new(firmware: &'a F) -> Self {
        Self {
            firmware,
            lock: Mutex::new(()),
        }
    }
}

impl<'a, F: Firmware> print::Write for FirmwareConsole<'a, F> {
    fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result {
        let _guard = self.lock.lock();
        fmt::Write::write_fmt(&mut Writer(self.firmware), args)
    }
}

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub static SBI_CONSOLE: FirmwareConsole<'static, crate::sbi::SbiFirmware> =
    FirmwareConsole::new(&crate::sbi::SBI);
