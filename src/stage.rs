//! Stand-in next stage. A real loader links its own `hartboot_main` and
//! `hartboot_secondary_main` in place of these.

use hartboot::{cpu, flags::BOOT_FLAGS, kprintln, registry::NEXT_LOGICAL_CORE_ID};

#[no_mangle]
extern "C" fn hartboot_main(hart_id: usize, descriptor: usize) -> ! {
    kprintln!(
        "hartboot: hart {} reached the next stage, fdt at {:#x}",
        hart_id,
        descriptor
    );
    kprintln!(
        "hartboot: hsm_exists = {}, flags = {:?}, secondary ids claimed = {}",
        BOOT_FLAGS.hsm_exists(),
        BOOT_FLAGS.get(),
        NEXT_LOGICAL_CORE_ID.claimed()
    );
    cpu::wait_forever()
}

#[no_mangle]
extern "C" fn hartboot_secondary_main(logical_id: usize, descriptor: usize, hart_id: usize) -> ! {
    kprintln!(
        "hartboot: hart {} is secondary {}, fdt at {:#x}",
        hart_id,
        logical_id,
        descriptor
    );
    cpu::wait_forever()
}
