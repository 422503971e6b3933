//! Entry points the firmware jumps to.
//!
//! The firmware starts harts with `a0 = hart id` and `a1 = platform
//! descriptor`, no stack and no `gp`. Each entry sets up `gp`, picks a stack
//! and calls into Rust with the two values untouched in `a0`/`a1`. Nothing
//! before that call touches global state through `gp`.
//!
//! Harts whose id is past the entry stacks run the election in registers
//! and enter Rust only once they are on their final stack.

use core::arch::global_asm;

use hartboot::{
    config::{
        DESIGNATED_HART, ENTRY_STACK_SIZE, MAX_HART_ID, MAX_NODES, PRIMARY_STACK_SIZE,
        STACK_STRIDE,
    },
    context::HartBootContext,
    election::{Coordinator, Handoff},
    flags::{BootFlags, BOOT_FLAGS},
    logger, park,
    registry::NEXT_LOGICAL_CORE_ID,
    sbi::{Extension, SBI},
    stack::{self, ENTRY_STACKS, PRIMARY_STACK, SECONDARY_STACKS},
};
use log::{debug, info};

const BASE_EID: usize = 0x10;
const BASE_PROBE_EXTENSION: usize = 3;
const HSM_HART_START: usize = 0;
const HSM_HART_STOP: usize = 1;

global_asm!(
    r#"
    .macro ESTABLISH_ADDRESSING
        .option push
        .option norelax
        la      gp, __global_pointer$
        .option pop
    .endm

    .section .text.entry
    .globl _start
_start:
    ESTABLISH_ADDRESSING

    li      t0, {max_hart_id}
    bgeu    a0, t0, .Lelect_without_stack

    // sp = ENTRY_STACKS + (hart id + 1) * ENTRY_STACK_SIZE
    addi    t0, a0, 1
    li      t1, {entry_stack_size}
    mul     t0, t0, t1
    la      sp, {entry_stacks}
    add     sp, sp, t0
    call    {start_rust}
    j       .Lspin

    // No entry stack slot for this hart. Same election as the Rust one,
    // registers only. The firmware preserves everything but a0/a1.
.Lelect_without_stack:
    mv      s0, a0
    mv      s1, a1

    li      a7, {base_eid}
    li      a6, {base_probe_extension}
    li      a0, {hsm_eid}
    ecall
    bnez    a0, .Ldirect_without_stack
    beqz    a1, .Ldirect_without_stack

    la      t0, {boot_flags}
    li      t1, {hsm_exists}
    amoor.d.aqrl zero, t1, (t0)

    li      t2, {designated_hart}
    beq     s0, t2, .Ldirect_without_stack

    li      a7, {hsm_eid}
    li      a6, {hsm_hart_start}
    mv      a0, t2
    la      a1, _start_resume
    mv      a2, s1
    ecall
    bnez    a0, 1f
    la      t0, {boot_flags}
    li      t1, {migration_requested}
    amoor.d.aqrl zero, t1, (t0)
1:
    la      t0, {next_logical_id}
    li      t1, 1
    amoadd.d t2, t1, (t0)

    // Park unless id + 1 < MAX_NODES.
    addi    t3, t2, 1
    li      t4, {max_nodes}
    bgeu    t3, t4, .Lpark_without_stack

    // sp = SECONDARY_STACKS + logical id * STACK_STRIDE
    li      t1, {stack_stride}
    mul     t1, t2, t1
    la      sp, {secondary_stacks}
    add     sp, sp, t1
    mv      a0, t2
    mv      a1, s1
    mv      a2, s0
    call    {secondary_rust}
    j       .Lspin

.Ldirect_without_stack:
    la      sp, {primary_stack}
    li      t0, {primary_stack_size}
    add     sp, sp, t0
    mv      a0, s0
    mv      a1, s1
    call    {direct_rust}
    j       .Lspin

.Lpark_without_stack:
    li      a7, {hsm_eid}
    li      a6, {hsm_hart_stop}
    ecall
.Lspin:
    wfi
    j       .Lspin

    .section .text
    .globl _start_resume
_start_resume:
    ESTABLISH_ADDRESSING
    la      sp, {primary_stack}
    li      t0, {primary_stack_size}
    add     sp, sp, t0
    call    {resume_rust}
1:
    wfi
    j       1b

    // handoff(a0, a1, a2, stack_top, entry)
    .globl __hartboot_handoff
__hartboot_handoff:
    mv      sp, a3
    jr      a4
"#,
    max_hart_id = const MAX_HART_ID,
    max_nodes = const MAX_NODES,
    designated_hart = const DESIGNATED_HART,
    entry_stack_size = const ENTRY_STACK_SIZE,
    entry_stacks = sym ENTRY_STACKS,
    stack_stride = const STACK_STRIDE,
    secondary_stacks = sym SECONDARY_STACKS,
    primary_stack = sym PRIMARY_STACK,
    primary_stack_size = const PRIMARY_STACK_SIZE,
    boot_flags = sym BOOT_FLAGS,
    hsm_exists = const BootFlags::HSM_EXISTS.bits(),
    migration_requested = const BootFlags::MIGRATION_REQUESTED.bits(),
    next_logical_id = sym NEXT_LOGICAL_CORE_ID,
    base_eid = const BASE_EID,
    base_probe_extension = const BASE_PROBE_EXTENSION,
    hsm_eid = const Extension::Hsm as usize,
    hsm_hart_start = const HSM_HART_START,
    hsm_hart_stop = const HSM_HART_STOP,
    start_rust = sym _start_rust,
    resume_rust = sym _resume_rust,
    direct_rust = sym _direct_rust,
    secondary_rust = sym _secondary_rust,
);

extern "C" {
    fn _start_resume();
    fn __hartboot_handoff(a0: usize, a1: usize, a2: usize, stack_top: usize, entry: usize) -> !;

    fn hartboot_main(hart_id: usize, descriptor: usize) -> !;
    fn hartboot_secondary_main(logical_id: usize, descriptor: usize, hart_id: usize) -> !;
}

/// Switches to `stack_top` and jumps to `entry` with `a0..a2` set.
///
/// Safety: `stack_top` must be the top of a stack nobody else uses and
/// `entry` must never return.
unsafe fn handoff(a0: usize, a1: usize, a2: usize, stack_top: usize, entry: usize) -> ! {
    __hartboot_handoff(a0, a1, a2, stack_top, entry)
}

unsafe extern "C" fn _start_rust(hart_id: usize, descriptor: usize) -> ! {
    logger::init();

    let mut ctx = HartBootContext::new(hart_id, descriptor);
    let coordinator = Coordinator::new(
        &SBI,
        &BOOT_FLAGS,
        &NEXT_LOGICAL_CORE_ID,
        _start_resume as usize,
    );

    let route = coordinator.elect(&mut ctx);
    match route.handoff(stack::primary_stack_top(), &SECONDARY_STACKS) {
        Handoff::NextStage { stack_top } => {
            debug!("hart {}: entering next stage", ctx.physical_id);
            handoff(hart_id, descriptor, 0, stack_top, hartboot_main as usize)
        }
        Handoff::Secondary { id, stack_top } => {
            debug!("hart {}: secondary {} on stack {:#x}", ctx.physical_id, id, stack_top);
            handoff(
                id.0,
                descriptor,
                hart_id,
                stack_top,
                hartboot_secondary_main as usize,
            )
        }
        Handoff::Park => park::park(&SBI, &ctx),
    }
}

/// Where a migrated designated hart starts. Already on the designated stack,
/// so it goes straight on without electing again.
unsafe extern "C" fn _resume_rust(hart_id: usize, descriptor: usize) -> ! {
    logger::init();
    info!("hart {}: started as the designated hart", hart_id);
    hartboot_main(hart_id, descriptor)
}

/// A hart past the entry stacks that went direct in the entry code.
unsafe extern "C" fn _direct_rust(hart_id: usize, descriptor: usize) -> ! {
    logger::init();
    info!("hart {}: continuing on this hart", hart_id);
    hartboot_main(hart_id, descriptor)
}

/// A hart past the entry stacks that claimed `logical_id` in the entry code.
/// Already on its secondary stack.
unsafe extern "C" fn _secondary_rust(logical_id: usize, descriptor: usize, hart_id: usize) -> ! {
    logger::init();
    debug!("hart {}: secondary {} from the entry code", hart_id, logical_id);
    hartboot_secondary_main(logical_id, descriptor, hart_id)
}
