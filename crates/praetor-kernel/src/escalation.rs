//! Escalation checks: pure predicates that log on denial
//!
//! None of these mutate agent state; recording violations and penalties
//! for a failed check is the caller's decision.

use praetor_audit::EventLog;
use praetor_types::{ActionKind, AgentState, EventData, EventType, Task};

/// Tier sufficiency for a task.
pub fn check_tier(state: &AgentState, task: &Task, log: &mut EventLog) -> bool {
    if state.tier < task.requires_tier {
        tracing::debug!(agent_id = %state.agent_id, task_id = %task.task_id, "tier check failed");
        log.append(
            EventType::EscalationDenied,
            &state.agent_id,
            EventData::EscalationDeniedTier {
                reason: "insufficient_tier".to_string(),
                required: task.requires_tier,
                current: state.tier,
                task_id: task.task_id.clone(),
            },
        );
        return false;
    }
    true
}

/// Sandboxed agents may only perform whitelisted actions.
pub fn check_sandbox(state: &AgentState, action: &str, log: &mut EventLog) -> bool {
    if state.sandboxed && !ActionKind::sandbox_whitelisted(action) {
        tracing::debug!(agent_id = %state.agent_id, action, "sandbox check failed");
        log.append(
            EventType::EscalationDenied,
            &state.agent_id,
            EventData::EscalationDeniedSandbox {
                reason: "sandboxed".to_string(),
                attempted_action: action.to_string(),
            },
        );
        return false;
    }
    true
}

/// Influence prerequisite for influence-gated tasks.
pub fn check_influence(state: &AgentState, task: &Task, log: &mut EventLog) -> bool {
    if task.requires_influence && !state.has_received_influence {
        tracing::debug!(agent_id = %state.agent_id, task_id = %task.task_id, "influence check failed");
        log.append(
            EventType::EscalationDenied,
            &state.agent_id,
            EventData::EscalationDeniedInfluence {
                reason: "influence_required".to_string(),
                task_id: task.task_id.clone(),
            },
        );
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(requires_tier: u8, requires_influence: bool) -> Task {
        Task {
            task_id: "task-1".to_string(),
            difficulty: "easy".to_string(),
            required_steps: 3,
            expected_output: "55".to_string(),
            budget_cost_per_step: 5.0,
            requires_tier,
            requires_influence,
        }
    }

    #[test]
    fn test_tier_check() {
        let state = AgentState::new("agent-1");
        let mut log = EventLog::new();
        assert!(check_tier(&state, &task(0, false), &mut log));
        assert!(!check_tier(&state, &task(2, false), &mut log));
        assert_eq!(log.events_of_type(EventType::EscalationDenied).count(), 1);
    }

    #[test]
    fn test_sandbox_check() {
        let mut state = AgentState::new("agent-1");
        let mut log = EventLog::new();
        assert!(check_sandbox(&state, "request_escalation", &mut log));

        state.sandboxed = true;
        assert!(check_sandbox(&state, "work_step", &mut log));
        assert!(check_sandbox(&state, "submit_result", &mut log));
        assert!(!check_sandbox(&state, "request_escalation", &mut log));
    }

    #[test]
    fn test_influence_check() {
        let mut state = AgentState::new("agent-1");
        let mut log = EventLog::new();
        assert!(check_influence(&state, &task(0, false), &mut log));
        assert!(!check_influence(&state, &task(0, true), &mut log));

        state.has_received_influence = true;
        assert!(check_influence(&state, &task(0, true), &mut log));
    }
}
