use core::fmt;

/// Physical hart id, as handed over by the firmware in `a0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct HartId(pub usize);

/// Dense index handed out to harts on the secondary path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct LogicalId(pub usize);

/// Opaque platform descriptor (device tree) address from `a1`. Never
/// dereferenced here, only passed along.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct PlatformDescriptor(pub usize);

impl fmt::Display for HartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlatformDescriptor({:#x})", self.0)
    }
}

/// The two values the firmware supplies at entry, plus the logical id once
/// one has been claimed. Lives on the entering hart's own stack.
#[derive(Debug, Clone, Copy)]
pub struct HartBootContext {
    pub physical_id: HartId,
    pub platform_descriptor: PlatformDescriptor,
    pub logical_id: Option<LogicalId>,
}

impl HartBootContext {
    pub const fn new(hart_id: usize, descriptor: usize) -> Self {
        Self {
            physical_id: HartId(hart_id),
            platform_descriptor: PlatformDescriptor(descriptor),
            logical_id: None,
        }
    }
}
