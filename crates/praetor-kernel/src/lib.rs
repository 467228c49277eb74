//! Praetor Kernel - the governance state machine
//!
//! The kernel is the single entry point through which every agent action is
//! authenticated, authorized, applied, and logged. `process_intent` runs
//! ordered gates (ban, sandbox, signature) and then dispatches to an
//! action handler; handlers consult and mutate the subsystems, each of
//! which appends to the audit log.
//!
//! # Key Principle
//!
//! Policy rejection is an expected, common, loggable outcome, not an
//! exceptional condition: every outcome is a boolean plus log entries.
//! `Err` is reserved for caller misuse (unregistered agent ids); the
//! kernel itself never aborts mid-run.

pub mod economy;
pub mod escalation;
pub mod influence;
pub mod kernel;
pub mod reputation;
pub mod sanction;
pub mod tasks;
pub mod tier;
pub mod validation;

pub use influence::PendingInfluence;
pub use kernel::{Kernel, KernelError};
pub use tasks::TaskRegistry;
