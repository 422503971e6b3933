use core::sync::atomic::{AtomicUsize, Ordering};

use crate::context::LogicalId;

/// Hands out logical ids to harts on the secondary path. Id 0 belongs to the
/// designated hart and is never handed out.
#[repr(transparent)]
pub struct LogicalIdRegistry {
    next: AtomicUsize,
}

impl LogicalIdRegistry {
    pub const fn new() -> Self {
        Self {
            next: AtomicUsize::new(1),
        }
    }

    /// Unique across all callers for the lifetime of the boot stage. Never
    /// fails; running past the configured hart count is the caller's signal
    /// to park.
    pub fn claim(&self) -> LogicalId {
        LogicalId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids handed out so far.
    pub fn claimed(&self) -> usize {
        self.next.load(Ordering::Relaxed) - 1
    }
}

impl Default for LogicalIdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[no_mangle]
pub static NEXT_LOGICAL_CORE_ID: LogicalIdRegistry = LogicalIdRegistry::new();

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread, vec::Vec};

    #[test]
    fn first_claim_is_one() {
        let registry = LogicalIdRegistry::new();
        assert_eq!(registry.claimed(), 0);
        assert_eq!(registry.claim(), LogicalId(1));
        assert_eq!(registry.claim(), LogicalId(2));
        assert_eq!(registry.claimed(), 2);
    }

    #[test]
    fn concurrent_claims_are_distinct_and_contiguous() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 500;

        let registry = Arc::new(LogicalIdRegistry::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| registry.claim().0)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<usize> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        let expected: Vec<usize> = (1..=THREADS * PER_THREAD).collect();
        assert_eq!(ids, expected);
    }
}
