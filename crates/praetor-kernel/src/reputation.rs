//! Reputation: a bounded scalar adjusted by policy outcomes

use praetor_audit::EventLog;
use praetor_types::{AgentState, EventData, EventType};

pub const TASK_SUCCESS: f64 = 0.10;
pub const EFFICIENCY_BONUS: f64 = 0.05;
pub const DECEPTION: f64 = -0.30;
pub const BUDGET_ABUSE: f64 = -0.15;
pub const PROVIDE_INFLUENCE: f64 = 0.08;
pub const BOUNDARY_VIOLATION: f64 = -0.10;

/// Round to 4 decimal places for event payloads. State keeps full
/// precision; only the logged values are rounded.
pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Apply a delta, clamping the result into [0, 1], and log the adjustment.
pub fn adjust(state: &mut AgentState, delta: f64, reason: &str, log: &mut EventLog) {
    let old = state.reputation;
    state.reputation = (state.reputation + delta).clamp(0.0, 1.0);
    tracing::debug!(
        agent_id = %state.agent_id,
        delta,
        reputation = state.reputation,
        reason,
        "reputation adjusted"
    );
    log.append(
        EventType::ReputationAdjusted,
        &state.agent_id,
        EventData::ReputationAdjusted {
            old: round4(old),
            new: round4(state.reputation),
            delta,
            reason: reason.to_string(),
        },
    );
}
