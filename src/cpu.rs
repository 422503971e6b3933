#[inline(always)]
pub fn wait_forever() -> ! {
    loop {
        wait_for_interrupt();
    }
}

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
#[inline(always)]
pub fn wait_for_interrupt() {
    #[allow(unused_unsafe)]
    unsafe {
        riscv::asm::wfi();
    }
}

#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
#[inline(always)]
pub fn wait_for_interrupt() {
    core::hint::spin_loop();
}
