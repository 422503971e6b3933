fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=link.ld");
    for var in [
        "HARTBOOT_DESIGNATED_HART",
        "HARTBOOT_MAX_NODES",
        "HARTBOOT_MAX_HART_ID",
        "HARTBOOT_LOG",
        "HARTBOOT_UART_BASE",
    ] {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    // Host builds (unit tests) use the platform linker defaults.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("none") {
        println!("cargo:rustc-link-search={}", env!("CARGO_MANIFEST_DIR"));
        println!("cargo:rustc-link-arg-bins=--script=link.ld");
    }
}
