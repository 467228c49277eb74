//! Praetor Sim - the standard governance scenario
//!
//! Wires the reference strategies to one kernel and drives a fixed number
//! of rounds:
//!
//! - Four tasks of graded difficulty, one requiring an influence unlock
//!   and one gated behind tier 2
//! - Six agents, one per strategy, acting in registration order
//! - A between-acts influence phase where the efficient agent fulfills
//!   every pending request
//!
//! # Key Principle
//!
//! Nothing here consults a clock, a thread, or an RNG. Two runs of the
//! standard scenario produce byte-identical event logs.

pub mod report;

use praetor_agents::{
    Agent, BoundaryAgent, DeceptiveAgent, EfficientAgent, LooperAgent, NaiveAgent, SpecialistAgent,
};
use praetor_kernel::{Kernel, KernelError};
use praetor_types::{ActionKind, IntentPayload, Task};

/// Budget every agent starts with.
pub const INITIAL_BUDGET: f64 = 100.0;

/// Rounds the standard scenario runs.
pub const NUM_ROUNDS: u32 = 15;

/// The agent that fulfills influence requests between acts.
const INFLUENCE_PROVIDER: &str = "efficient-1";

fn standard_tasks() -> Vec<Task> {
    vec![
        Task {
            task_id: "task-easy-1".to_string(),
            difficulty: "easy".to_string(),
            required_steps: 3,
            expected_output: "55".to_string(),
            budget_cost_per_step: 5.0,
            requires_tier: 0,
            requires_influence: false,
        },
        Task {
            task_id: "task-easy-2".to_string(),
            difficulty: "easy".to_string(),
            required_steps: 2,
            expected_output: "olleh".to_string(),
            budget_cost_per_step: 5.0,
            requires_tier: 0,
            requires_influence: false,
        },
        Task {
            task_id: "task-hard-1".to_string(),
            difficulty: "hard".to_string(),
            required_steps: 5,
            expected_output: "FACTORED:7x13".to_string(),
            budget_cost_per_step: 8.0,
            requires_tier: 0,
            requires_influence: true,
        },
        Task {
            task_id: "task-privileged-1".to_string(),
            difficulty: "hard".to_string(),
            required_steps: 4,
            expected_output: "DATASET_HASH:abc123".to_string(),
            budget_cost_per_step: 10.0,
            requires_tier: 2,
            requires_influence: false,
        },
    ]
}

fn standard_agents() -> Vec<Box<dyn Agent>> {
    vec![
        Box::new(EfficientAgent::new("efficient-1", "task-easy-1", "55", 3)),
        Box::new(LooperAgent::new("looper-1", "task-easy-2")),
        Box::new(DeceptiveAgent::new("deceptive-1", "task-easy-1")),
        Box::new(SpecialistAgent::new(
            "specialist-1",
            "task-hard-1",
            "FACTORED:7x13",
            5,
        )),
        Box::new(NaiveAgent::new("naive-1", "task-easy-2", "olleh", 2)),
        Box::new(BoundaryAgent::new("boundary-1", "task-privileged-1")),
    ]
}

/// One kernel plus the strategies driving it.
pub struct Simulation {
    kernel: Kernel,
    agents: Vec<Box<dyn Agent>>,
}

impl Simulation {
    /// Build the standard scenario: register tasks, register and assign
    /// each agent, touch nothing else.
    pub fn standard() -> Result<Self, KernelError> {
        let mut kernel = Kernel::new();
        for task in standard_tasks() {
            kernel.register_task(task);
        }

        let agents = standard_agents();
        let assignments = [
            ("efficient-1", "task-easy-1"),
            ("looper-1", "task-easy-2"),
            ("deceptive-1", "task-easy-1"),
            ("specialist-1", "task-hard-1"),
            ("naive-1", "task-easy-2"),
            ("boundary-1", "task-privileged-1"),
        ];

        for (agent, (agent_id, task_id)) in agents.iter().zip(assignments) {
            kernel.register_agent(agent_id, agent.identity().public_key(), INITIAL_BUDGET);
            kernel.assign_task_to_agent(agent_id, task_id)?;
        }

        Ok(Self { kernel, agents })
    }

    /// Drive every round to completion.
    pub fn run(&mut self) -> Result<(), KernelError> {
        for round in 0..NUM_ROUNDS {
            tracing::debug!(round, "round start");
            self.kernel.record_round_start(round);

            for agent in &mut self.agents {
                agent.act(&mut self.kernel, round)?;
            }

            self.process_influence_queue()?;
            self.kernel.record_round_end(round);
        }
        self.kernel.record_simulation_complete(NUM_ROUNDS);
        Ok(())
    }

    /// Between acts: the efficient agent fulfills every pending influence
    /// request, unless it has itself been banned.
    fn process_influence_queue(&mut self) -> Result<(), KernelError> {
        let pending = self.kernel.pending_influence_requests();
        if pending.is_empty() {
            return Ok(());
        }

        let Some(provider) = self
            .agents
            .iter()
            .find(|a| a.agent_id() == INFLUENCE_PROVIDER)
        else {
            return Ok(());
        };
        if self
            .kernel
            .get_state(INFLUENCE_PROVIDER)
            .is_some_and(|s| s.banned)
        {
            return Ok(());
        }

        for req in pending {
            let intent = IntentPayload::new(
                ActionKind::ProvideInfluence,
                &req.task_id,
                &req.requester_id,
            );
            provider.identity().submit(&mut self.kernel, &intent)?;
        }
        Ok(())
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}
