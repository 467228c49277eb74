//! Validation: compare submitted output against ground truth
//!
//! This routine records success or failure but never itself flags
//! deception; that judgment belongs to the intent pipeline.

use praetor_audit::EventLog;
use praetor_types::{AgentState, EventData, EventType, Task};

/// Validate a submitted result. Logs `TASK_SUBMITTED` first, then either
/// `TASK_VALIDATED{efficient}` or `TASK_FAILED{expected, got}`.
pub fn validate_output(
    state: &mut AgentState,
    task: &Task,
    submitted: &str,
    log: &mut EventLog,
) -> bool {
    log.append(
        EventType::TaskSubmitted,
        &state.agent_id,
        EventData::TaskSubmitted {
            task_id: task.task_id.clone(),
            output: submitted.to_string(),
        },
    );

    if submitted == task.expected_output {
        let efficient = state.current_task_steps <= task.required_steps;
        state.tasks_completed += 1;
        log.append(
            EventType::TaskValidated,
            &state.agent_id,
            EventData::TaskValidated {
                task_id: task.task_id.clone(),
                efficient,
            },
        );
        true
    } else {
        state.tasks_failed += 1;
        log.append(
            EventType::TaskFailed,
            &state.agent_id,
            EventData::TaskFailed {
                task_id: task.task_id.clone(),
                expected: task.expected_output.clone(),
                got: submitted.to_string(),
            },
        );
        false
    }
}
