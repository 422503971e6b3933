use core::fmt;

use crate::driver::console;

pub trait Write {
    fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result;
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    // Nowhere to report a console failure this early.
    let _ = console().write_fmt(args);
}

#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => ($crate::print::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! kprintln {
    () => ($crate::kprint!("\n"));
    ($($arg:tt)*) => ({
        $crate::print::_print(format_args!("{}\n", format_args!($($arg)*)));
    })
}
