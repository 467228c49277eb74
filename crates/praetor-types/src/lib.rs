//! Praetor Types - Canonical domain types for the governance kernel
//!
//! This crate contains all foundational types for Praetor with zero
//! dependencies on other praetor crates:
//!
//! - Event types (the closed enumeration plus typed per-event payloads)
//! - Agent state (budget, reputation, tier, sanction flags, counters)
//! - Task configuration (immutable after registration)
//! - Intent payloads with a canonical byte encoding for signing
//!
//! # Architectural Invariants
//!
//! 1. Events are immutable once appended; `data` is a tagged union in code
//!    but serializes to the same plain-object wire shape consumers expect
//! 2. `sandboxed` and `banned` are one-way flags, never cleared
//! 3. The canonical intent encoding is byte-stable: signing and
//!    verification must agree on it exactly

pub mod agent;
pub mod event;
pub mod intent;
pub mod task;

pub use agent::*;
pub use event::*;
pub use intent::*;
pub use task::*;

/// Actor id used for events emitted by the kernel itself (round markers,
/// simulation lifecycle) rather than by a registered agent.
pub const KERNEL_ACTOR: &str = "kernel";
