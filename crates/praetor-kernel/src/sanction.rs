//! Sandbox/ban: the violation counter and its two irreversible sanctions

use praetor_audit::EventLog;
use praetor_types::{AgentState, EventData, EventType};

pub const SANDBOX_THRESHOLD: u32 = 2;
pub const BAN_THRESHOLD: u32 = 4;

/// Record one policy violation and check sanction thresholds in descending
/// severity. Ban takes precedence: one call can ban directly even if the
/// sandbox stage was skipped. Both flags are one-way.
pub fn record_violation(state: &mut AgentState, reason: &str, log: &mut EventLog) {
    state.violation_count += 1;
    log.append(
        EventType::ViolationRecorded,
        &state.agent_id,
        EventData::ViolationRecorded {
            count: state.violation_count,
            reason: reason.to_string(),
        },
    );

    if state.violation_count >= BAN_THRESHOLD && !state.banned {
        state.banned = true;
        tracing::warn!(agent_id = %state.agent_id, violations = state.violation_count, "agent banned");
        log.append(
            EventType::AgentBanned,
            &state.agent_id,
            EventData::Sanction {
                violation_count: state.violation_count,
            },
        );
    } else if state.violation_count >= SANDBOX_THRESHOLD && !state.sandboxed {
        state.sandboxed = true;
        tracing::warn!(agent_id = %state.agent_id, violations = state.violation_count, "agent sandboxed");
        log.append(
            EventType::AgentSandboxed,
            &state.agent_id,
            EventData::Sanction {
                violation_count: state.violation_count,
            },
        );
    }
}
