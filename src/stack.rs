use core::cell::UnsafeCell;

use crate::{
    config::{
        ENTRY_STACK_SIZE, MAX_HART_ID, PRIMARY_STACK_SIZE, SECONDARY_STACK_SLOTS, STACK_STRIDE,
    },
    context::LogicalId,
};

/// `N` stacks of `SIZE` bytes each, back to back. Slot `i` occupies bytes
/// `[i * SIZE, (i + 1) * SIZE)`; stacks grow down from the slot's top.
#[repr(C, align(4096))]
pub struct StackArena<const SIZE: usize, const N: usize> {
    slots: UnsafeCell<[[u8; SIZE]; N]>,
}

/// Safety: the arena itself never reads or writes its memory. Each hart only
/// ever runs on the slot its own unique id maps to.
unsafe impl<const SIZE: usize, const N: usize> Sync for StackArena<SIZE, N> {}

impl<const SIZE: usize, const N: usize> StackArena<SIZE, N> {
    pub const fn new() -> Self {
        Self {
            slots: UnsafeCell::new([[0; SIZE]; N]),
        }
    }

    #[inline(always)]
    pub fn base(&self) -> usize {
        self.slots.get() as usize
    }

    #[inline(always)]
    pub fn end(&self) -> usize {
        self.base() + SIZE * N
    }

    /// Top of slot `index`, if the arena has one.
    pub fn top_of(&self, index: usize) -> Option<usize> {
        if index < N {
            Some(self.base() + (index + 1) * SIZE)
        } else {
            None
        }
    }

    /// Stack top for a secondary hart: `base + id * SIZE`, so logical id `i`
    /// runs on slot `i - 1`. Id 0 is the designated hart, which has its own
    /// stack, and ids past `N` get nothing; those harts must park.
    pub fn stack_for(&self, id: LogicalId) -> Option<usize> {
        match id.0 {
            0 => None,
            i => self.top_of(i - 1),
        }
    }
}

impl<const SIZE: usize, const N: usize> Default for StackArena<SIZE, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// One page per secondary hart, indexed by logical id. With `MAX_NODES`
/// harts, ids `1..MAX_NODES - 1` fit.
#[cfg_attr(target_os = "none", link_section = ".bss.stack")]
pub static SECONDARY_STACKS: StackArena<STACK_STRIDE, SECONDARY_STACK_SLOTS> = StackArena::new();

/// The designated hart's stack. Only one designated hart runs at a time.
#[cfg_attr(target_os = "none", link_section = ".bss.stack")]
pub static PRIMARY_STACK: StackArena<PRIMARY_STACK_SIZE, 1> = StackArena::new();

/// Election-only stacks, indexed by physical hart id.
#[cfg_attr(target_os = "none", link_section = ".bss.stack")]
pub static ENTRY_STACKS: StackArena<ENTRY_STACK_SIZE, MAX_HART_ID> = StackArena::new();

pub fn stack_for(id: LogicalId) -> Option<usize> {
    SECONDARY_STACKS.stack_for(id)
}

pub fn primary_stack_top() -> usize {
    PRIMARY_STACK.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_NODES;

    // Sized for four harts: logical ids 1 and 2 run as secondaries.
    type Arena = StackArena<4096, 2>;

    #[test]
    fn stack_top_is_base_plus_id_pages() {
        let arena = Arena::new();
        assert_eq!(arena.stack_for(LogicalId(1)), Some(arena.base() + 0x1000));
        assert_eq!(arena.stack_for(LogicalId(2)), Some(arena.base() + 0x2000));
        assert_eq!(arena.stack_for(LogicalId(2)), Some(arena.end()));
    }

    #[test]
    fn slots_are_disjoint_and_inside_the_arena() {
        let arena = Arena::new();
        let tops: std::vec::Vec<usize> = (1..=2)
            .map(|i| arena.stack_for(LogicalId(i)).unwrap())
            .collect();

        for (i, &top) in tops.iter().enumerate() {
            let bottom = top - 4096;
            assert_eq!(bottom, arena.base() + i * 4096);
            assert!(top <= arena.end());
            for (j, &other) in tops.iter().enumerate() {
                if i != j {
                    let other_bottom = other - 4096;
                    assert!(top <= other_bottom || other <= bottom);
                }
            }
        }
    }

    #[test]
    fn designated_and_extra_ids_get_no_stack() {
        let arena = Arena::new();
        assert_eq!(arena.stack_for(LogicalId(0)), None);
        assert_eq!(arena.stack_for(LogicalId(3)), None);
        assert_eq!(arena.stack_for(LogicalId(100)), None);
    }

    #[test]
    fn tops_are_aligned() {
        let arena = StackArena::<256, 3>::new();
        assert_eq!(arena.base() % 4096, 0);
        for i in 1..=3 {
            assert_eq!(arena.stack_for(LogicalId(i)).unwrap() % 16, 0);
        }
    }

    #[test]
    fn two_nodes_have_no_secondary_stacks() {
        let arena = StackArena::<64, 0>::new();
        assert_eq!(arena.stack_for(LogicalId(0)), None);
        assert_eq!(arena.stack_for(LogicalId(1)), None);
    }

    #[test]
    fn global_arenas_match_config() {
        assert_eq!(
            SECONDARY_STACKS.end() - SECONDARY_STACKS.base(),
            STACK_STRIDE * MAX_NODES.saturating_sub(2)
        );
        if MAX_NODES > 2 {
            assert_eq!(
                stack_for(LogicalId(MAX_NODES - 2)),
                Some(SECONDARY_STACKS.end())
            );
        }
        assert_eq!(stack_for(LogicalId(MAX_NODES - 1)), None);
        assert_eq!(primary_stack_top(), PRIMARY_STACK.base() + PRIMARY_STACK_SIZE);
        assert_eq!(ENTRY_STACKS.top_of(MAX_HART_ID), None);
    }
}
