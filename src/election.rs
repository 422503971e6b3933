//! Deciding which hart goes on to the next stage.
//!
//! Every hart with an entry stack runs [`Coordinator::elect`] once. Without
//! the HSM extension the hart that got here simply carries on. With it, the
//! designated hart carries on and everyone else asks the firmware to start
//! the designated hart at the resume entry, then joins the secondary path.

use log::{debug, info, warn};

use crate::{
    config::{DESIGNATED_HART, MAX_NODES},
    context::{HartBootContext, HartId, LogicalId},
    flags::{BootFlags, BootFlagsCell},
    registry::LogicalIdRegistry,
    sbi::{Extension, Firmware},
    stack::StackArena,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Go to the next stage on the designated stack.
    Direct,
    /// Go to the secondary entry point on this id's stack.
    Secondary(LogicalId),
    /// More harts than configured; stop this one.
    Park(LogicalId),
}

impl Route {
    /// Route for a hart that just claimed `id` with `max_nodes` harts
    /// configured. The stackless entry path makes the same comparison.
    pub const fn for_claim(id: LogicalId, max_nodes: usize) -> Self {
        if id.0 + 1 >= max_nodes {
            Route::Park(id)
        } else {
            Route::Secondary(id)
        }
    }

    /// Pairs the route with the stack it will run on. A secondary whose id
    /// has no slab in `secondaries` is parked instead.
    pub fn handoff<const SIZE: usize, const N: usize>(
        self,
        primary_top: usize,
        secondaries: &StackArena<SIZE, N>,
    ) -> Handoff {
        match self {
            Route::Direct => Handoff::NextStage {
                stack_top: primary_top,
            },
            Route::Secondary(id) => match secondaries.stack_for(id) {
                Some(stack_top) => Handoff::Secondary { id, stack_top },
                None => Handoff::Park,
            },
            Route::Park(_) => Handoff::Park,
        }
    }
}

/// What the entry code jumps to after the election.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    NextStage { stack_top: usize },
    Secondary { id: LogicalId, stack_top: usize },
    Park,
}

pub struct Coordinator<'a, F: Firmware> {
    firmware: &'a F,
    flags: &'a BootFlagsCell,
    registry: &'a LogicalIdRegistry,
    designated: HartId,
    max_nodes: usize,
    resume_entry: usize,
}

impl<'a, F: Firmware> Coordinator<'a, F> {
    pub fn new(
        firmware: &'a F,
        flags: &'a BootFlagsCell,
        registry: &'a LogicalIdRegistry,
        resume_entry: usize,
    ) -> Self {
        Self {
            firmware,
            flags,
            registry,
            designated: HartId(DESIGNATED_HART),
            max_nodes: MAX_NODES,
            resume_entry,
        }
    }

    pub fn with_topology(mut self, designated: HartId, max_nodes: usize) -> Self {
        self.designated = designated;
        self.max_nodes = max_nodes;
        self
    }

    pub fn elect(&self, ctx: &mut HartBootContext) -> Route {
        let hart = ctx.physical_id;

        if !self.hsm_available(hart) {
            info!("hart {}: no HSM, continuing on this hart", hart);
            return Route::Direct;
        }
        self.flags.set(BootFlags::HSM_EXISTS);

        if hart == self.designated {
            debug!("hart {}: designated hart, continuing", hart);
            return Route::Direct;
        }

        self.request_migration(ctx);
        self.claim(ctx)
    }

    fn hsm_available(&self, hart: HartId) -> bool {
        match self.firmware.probe_extension(Extension::Hsm) {
            Ok(value) => value != 0,
            Err(err) => {
                debug!("hart {}: HSM probe failed: {}", hart, err);
                false
            }
        }
    }

    // Fire and forget: a failed start is logged, never retried.
    fn request_migration(&self, ctx: &HartBootContext) {
        let hart = ctx.physical_id;
        let target = self.designated;

        match self
            .firmware
            .hart_start(target.0, self.resume_entry, ctx.platform_descriptor.0)
        {
            Ok(()) => {
                self.flags.set(BootFlags::MIGRATION_REQUESTED);
                info!("hart {}: asked firmware to start hart {}", hart, target);
            }
            Err(err) => match self.firmware.hart_status(target.0) {
                Ok(state) => warn!(
                    "hart {}: starting hart {} failed: {}, it is {:?}",
                    hart, target, err, state
                ),
                Err(_) => warn!("hart {}: starting hart {} failed: {}", hart, target, err),
            },
        }
    }

    fn claim(&self, ctx: &mut HartBootContext) -> Route {
        let id = self.registry.claim();
        ctx.logical_id = Some(id);
        debug!("hart {}: claimed logical id {}", ctx.physical_id, id);
        Route::for_claim(id, self.max_nodes)
    }
}
