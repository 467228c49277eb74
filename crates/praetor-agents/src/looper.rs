//! Burns budget with work steps forever, never submits

use praetor_kernel::{Kernel, KernelError};
use praetor_types::{ActionKind, IntentPayload};

use crate::{Agent, AgentIdentity};

/// Steps attempted per round; wasteful looping behavior by design of the
/// standard scenario, not a kernel parameter.
const STEPS_PER_ROUND: u32 = 3;

pub struct LooperAgent {
    identity: AgentIdentity,
    task_id: String,
    done: bool,
}

impl LooperAgent {
    pub fn new(agent_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            identity: AgentIdentity::new(agent_id),
            task_id: task_id.into(),
            done: false,
        }
    }
}

impl Agent for LooperAgent {
    fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    fn act(&mut self, kernel: &mut Kernel, _round: u32) -> Result<(), KernelError> {
        if self.done {
            return Ok(());
        }
        if kernel
            .get_state(self.agent_id())
            .is_none_or(|s| s.banned || s.budget <= 0.0)
        {
            self.done = true;
            return Ok(());
        }

        for _ in 0..STEPS_PER_ROUND {
            if kernel
                .get_state(self.agent_id())
                .is_none_or(|s| s.budget <= 0.0)
            {
                self.done = true;
                return Ok(());
            }
            let intent = IntentPayload::new(ActionKind::WorkStep, &self.task_id, "");
            if !self.identity.submit(kernel, &intent)? {
                self.done = true;
                return Ok(());
            }
        }
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }
}
