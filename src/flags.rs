use core::sync::atomic::{AtomicUsize, Ordering};

use bitflags::bitflags;

bitflags! {
    pub struct BootFlags: usize {
        /// Some hart saw the HSM extension during election.
        const HSM_EXISTS = 1 << 0;
        /// Some hart had a start request for the designated hart accepted.
        const MIGRATION_REQUESTED = 1 << 1;
    }
}

/// Process-wide flag word shared by all harts. Bits are only ever set.
#[repr(transparent)]
pub struct BootFlagsCell(AtomicUsize);

impl BootFlagsCell {
    pub const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    pub fn set(&self, flags: BootFlags) {
        self.0.fetch_or(flags.bits(), Ordering::AcqRel);
    }

    pub fn get(&self) -> BootFlags {
        BootFlags::from_bits_truncate(self.0.load(Ordering::Acquire))
    }

    pub fn hsm_exists(&self) -> bool {
        self.get().contains(BootFlags::HSM_EXISTS)
    }
}

impl Default for BootFlagsCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Read by the next stage under the symbol `hsm_exists`.
#[export_name = "hsm_exists"]
pub static BOOT_FLAGS: BootFlagsCell = BootFlagsCell::new();
