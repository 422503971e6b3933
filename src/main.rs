#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod boot;
#[cfg(target_os = "none")]
mod panic;
#[cfg(target_os = "none")]
mod stage;

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("hartboot only runs bare-metal, build it with --target riscv64gc-unknown-none-elf");
    std::process::exit(1);
}
