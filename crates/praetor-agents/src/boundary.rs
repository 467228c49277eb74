//! Cycles policy-edge probes to exercise enforcement

use praetor_kernel::{Kernel, KernelError};
use praetor_types::{ActionKind, IntentPayload};

use crate::{Agent, AgentIdentity};

const PROBES: &[&str] = &[
    "access_privileged",
    "forge_signature",
    "act_while_sandboxed",
    "exceed_budget",
];

pub struct BoundaryAgent {
    identity: AgentIdentity,
    task_id: String,
    next_probe: usize,
    done: bool,
}

impl BoundaryAgent {
    pub fn new(agent_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            identity: AgentIdentity::new(agent_id),
            task_id: task_id.into(),
            next_probe: 0,
            done: false,
        }
    }
}

impl Agent for BoundaryAgent {
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

        let probe = PROBES[self.next_probe % PROBES.len()];
        self.next_probe += 1;
        let intent = IntentPayload::new(ActionKind::TestBoundary, &self.task_id, probe);
        self.identity.submit(kernel, &intent)?;
        Ok(())
    }

    fn done(&self) -> bool {
        self.done
    }
}
