//! Immutable task configuration

use serde::{Deserialize, Serialize};

/// A unit of work agents can be assigned. Created once at setup and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub difficulty: String,
    pub required_steps: u32,
    /// Exact-match ground truth for submitted results.
    pub expected_output: String,
    pub budget_cost_per_step: f64,
    /// Minimum tier an agent needs before work on this task is creditable.
    pub requires_tier: u8,
    /// Whether a collaborative influence unlock is mandatory first.
    pub requires_influence: bool,
}
