//! Per-agent mutable state, exclusively owned by the kernel

use serde::{Deserialize, Serialize};

/// Default reputation for a freshly registered agent.
pub const INITIAL_REPUTATION: f64 = 0.50;

/// Everything the kernel tracks about one registered agent.
///
/// `sandboxed` and `banned` are terminal: set at most once, never cleared.
/// `violation_count` is monotone non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    pub agent_id: String,
    pub budget: f64,
    pub reputation: f64,
    pub tier: u8,
    pub sandboxed: bool,
    pub banned: bool,
    pub violation_count: u32,
    pub tasks_completed: u32,
    pub tasks_failed: u32,
    pub steps_taken: u32,
    pub current_task_id: Option<String>,
    pub current_task_steps: u32,
    pub influence_requests: Vec<String>,
    pub influence_provided: Vec<String>,
    pub has_received_influence: bool,
}

impl AgentState {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            budget: 0.0,
            reputation: INITIAL_REPUTATION,
            tier: 0,
            sandboxed: false,
            banned: false,
            violation_count: 0,
            tasks_completed: 0,
            tasks_failed: 0,
            steps_taken: 0,
            current_task_id: None,
            current_task_steps: 0,
            influence_requests: Vec::new(),
            influence_provided: Vec::new(),
            has_received_influence: false,
        }
    }
}
