use core::panic::PanicInfo;

use hartboot::{
    cpu, kprintln,
    sbi::{Firmware, SBI},
};

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    kprintln!("hartboot: {}", info);
    // A panicking hart is of no use to the next stage either.
    let _ = SBI.hart_stop();
    cpu::wait_forever()
}
