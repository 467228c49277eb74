//! Praetor Agents - Reference Agent Strategies
//!
//! This crate provides the closed set of behavior variants the standard
//! simulation drives through the kernel:
//!
//! - **EfficientAgent**: minimal steps, correct output, earns tier upgrades
//! - **NaiveAgent**: honest but takes 2x the required steps
//! - **LooperAgent**: burns budget with work steps forever, never submits
//! - **DeceptiveAgent**: fabricates outputs until banned
//! - **SpecialistAgent**: needs the collaborative influence unlock to succeed
//! - **BoundaryAgent**: cycles policy-edge probes to test enforcement
//!
//! # Key Principle
//!
//! Strategies only ever PROPOSE signed intents; the kernel alone decides,
//! applies, and records. The kernel never needs to know which variant it
//! is talking to.

pub mod boundary;
pub mod deceptive;
pub mod efficient;
pub mod identity;
pub mod looper;
pub mod naive;
pub mod specialist;

pub use boundary::BoundaryAgent;
pub use deceptive::DeceptiveAgent;
pub use efficient::EfficientAgent;
pub use identity::AgentIdentity;
pub use looper::LooperAgent;
pub use naive::NaiveAgent;
pub use specialist::SpecialistAgent;

use praetor_kernel::{Kernel, KernelError};

/// A behavior strategy: produce zero or more signed intents per round.
pub trait Agent {
    /// The signing identity this strategy acts as.
    fn identity(&self) -> &AgentIdentity;

    /// Called exactly once per round, in a fixed stable order.
    fn act(&mut self, kernel: &mut Kernel, round: u32) -> Result<(), KernelError>;

    /// Whether the strategy has nothing left to do.
    fn done(&self) -> bool;

    fn agent_id(&self) -> &str {
        self.identity().agent_id()
    }
}
