//! Fails alone, succeeds once another agent provides influence

use praetor_kernel::{Kernel, KernelError};
use praetor_types::{ActionKind, IntentPayload};

use crate::{Agent, AgentIdentity};

enum Phase {
    /// Submit a wrong answer to discover the task is beyond it.
    TryAlone,
    /// Ask for influence, then wait for a provider.
    AwaitInfluence,
    /// Influence received: do the real work.
    Work,
    Done,
}

pub struct SpecialistAgent {
    identity: AgentIdentity,
    task_id: String,
    expected_output: String,
    required_steps: u32,
    steps_done: u32,
    requested: bool,
    phase: Phase,
}

impl SpecialistAgent {
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
            requested: false,
            phase: Phase::TryAlone,
        }
    }
}

impl Agent for SpecialistAgent {
    fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    fn act(&mut self, kernel: &mut Kernel, round: u32) -> Result<(), KernelError> {
        if kernel.get_state(self.agent_id()).is_some_and(|s| s.banned) {
            self.phase = Phase::Done;
            return Ok(());
        }

        match self.phase {
            Phase::TryAlone => {
                let intent =
                    IntentPayload::new(ActionKind::SubmitResult, &self.task_id, "WRONG_ANSWER");
                self.identity.submit(kernel, &intent)?;
                self.phase = Phase::AwaitInfluence;
            }
            Phase::AwaitInfluence => {
                if kernel
                    .get_state(self.agent_id())
                    .is_some_and(|s| s.has_received_influence)
                {
                    self.phase = Phase::Work;
                    return self.act(kernel, round);
                }
                if !self.requested {
                    let intent =
                        IntentPayload::new(ActionKind::RequestInfluence, &self.task_id, "");
                    self.identity.submit(kernel, &intent)?;
                    self.requested = true;
                }
            }
            Phase::Work => {
                if self.steps_done < self.required_steps {
                    let intent = IntentPayload::new(ActionKind::WorkStep, &self.task_id, "");
                    self.identity.submit(kernel, &intent)?;
                    self.steps_done += 1;
                } else {
                    let intent = IntentPayload::new(
                        ActionKind::SubmitResult,
                        &self.task_id,
                        &self.expected_output,
                    );
                    self.identity.submit(kernel, &intent)?;
                    self.phase = Phase::Done;
                }
            }
            Phase::Done => {}
        }
        Ok(())
    }

    fn done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }
}
