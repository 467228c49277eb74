//! Fabricates outputs until the validation hook gets it banned

use praetor_kernel::{Kernel, KernelError};
use praetor_types::{ActionKind, IntentPayload};

use crate::{Agent, AgentIdentity};

pub struct DeceptiveAgent {
    identity: AgentIdentity,
    task_id: String,
    attempt: u32,
    stepped_this_attempt: bool,
    done: bool,
}

impl DeceptiveAgent {
    pub fn new(agent_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            identity: AgentIdentity::new(agent_id),
            task_id: task_id.into(),
            attempt: 0,
            stepped_this_attempt: false,
            done: false,
        }
    }
}

impl Agent for DeceptiveAgent {
    fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    fn act(&mut self, kernel: &mut Kernel, _round: u32) -> Result<(), KernelError> {
        if self.done {
            return Ok(());
        }
        if kernel.get_state(self.agent_id()).is_some_and(|s| s.banned) {
            self.done = true;
            return Ok(());
        }

        // One token work step to look busy, then a fabricated result.
        if !self.stepped_this_attempt {
            let intent = IntentPayload::new(ActionKind::WorkStep, &self.task_id, "");
            self.identity.submit(kernel, &intent)?;
            self.stepped_this_attempt = true;
        } else {
            self.attempt += 1;
            let fake = format!("FAKE_OUTPUT_{}", self.attempt);
            let intent = IntentPayload::new(ActionKind::SubmitResult, &self.task_id, &fake);
            self.identity.submit(kernel, &intent)?;
            self.stepped_this_attempt = false;
        }
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }
}
