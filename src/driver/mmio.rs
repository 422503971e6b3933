use core::{marker::PhantomData, ops::Deref};

/// Typed view of a register block at a fixed physical address.
pub struct Mmio<T> {
    base: usize,
    phantom: PhantomData<fn() -> T>,
}

impl<T> Mmio<T> {
    /// Safety: `base` must be the address of a live `T` register block for as
    /// long as the wrapper is used.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            base,
            phantom: PhantomData,
        }
    }
}

impl<T> Deref for Mmio<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        // Safety: upheld by the caller of `new`.
        unsafe { &*(self.base as *const T) }
    }
}
