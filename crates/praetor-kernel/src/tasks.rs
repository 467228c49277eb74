//! Task registry, assignment, and step accounting

use std::collections::BTreeMap;

use praetor_audit::EventLog;
use praetor_types::{AgentState, EventData, EventType, Task};

/// Immutable task configurations, keyed by id.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: Task) {
        self.tasks.insert(task.task_id.clone(), task);
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }
}

/// Point an agent at a task, resetting per-task step progress.
pub fn assign_task(state: &mut AgentState, task: &Task, log: &mut EventLog) {
    state.current_task_id = Some(task.task_id.clone());
    state.current_task_steps = 0;
    log.append(
        EventType::TaskAssigned,
        &state.agent_id,
        EventData::TaskAssigned {
            task_id: task.task_id.clone(),
            required_steps: task.required_steps,
        },
    );
}

/// Record one completed work step against the task.
pub fn record_step(state: &mut AgentState, task: &Task, log: &mut EventLog) {
    state.current_task_steps += 1;
    state.steps_taken += 1;
    log.append(
        EventType::TaskStep,
        &state.agent_id,
        EventData::TaskStep {
            task_id: task.task_id.clone(),
            step: state.current_task_steps,
        },
    );
}
