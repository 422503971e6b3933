//! Earliest boot stage for multi-hart RISC-V machines.
//!
//! Every hart the firmware starts lands in the same entry code. This crate
//! decides which hart carries on to the next stage, gives every other hart a
//! dense logical id and a private stack, and parks the harts nobody needs.
//! The assembly entry points and the dispatch that uses these pieces live in
//! the `hartboot` binary.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod context;
pub mod cpu;
pub mod driver;
pub mod election;
pub mod error;
pub mod flags;
pub mod logger;
pub mod park;
pub mod print;
pub mod registry;
pub mod sbi;
pub mod stack;
