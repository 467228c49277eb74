//! Minimal steps, correct output, earns tier upgrades

use praetor_kernel::{Kernel, KernelError};
use praetor_types::{ActionKind, IntentPayload};

use crate::{Agent, AgentIdentity};

pub struct EfficientAgent {
    identity: AgentIdentity,
    task_id: String,
    expected_output: String,
    required_steps: u32,
    steps_done: u32,
    submitted: bool,
    done: bool,
}

impl EfficientAgent {
    pub fn new(
        agent_id: impl Into<String>,
        task_id: impl Into<String>,
        expected_output: impl Into<String>,
        required_steps: u32,
    ) -> Self {
        Self {
            identity: AgentIdentity::new(agent_id),
            task_id: task_id.into(),
            expected_output: expected_output.into(),
            required_steps,
            steps_done: 0,
            submitted: false,
            done: false,
        }
    }
}

impl Agent for EfficientAgent {
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

        if self.steps_done < self.required_steps {
            let intent = IntentPayload::new(ActionKind::WorkStep, &self.task_id, "");
            self.identity.submit(kernel, &intent)?;
            self.steps_done += 1;
        } else if !self.submitted {
            let intent =
                IntentPayload::new(ActionKind::SubmitResult, &self.task_id, &self.expected_output);
            self.identity.submit(kernel, &intent)?;
            self.submitted = true;
            self.done = true;
        }
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }
}
