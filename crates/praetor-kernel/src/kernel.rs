//! The Kernel: gated intent pipeline and owner of all mutable state

use std::collections::BTreeMap;

use ed25519_dalek::VerifyingKey;
use thiserror::Error;

use praetor_audit::EventLog;
use praetor_types::{ActionKind, AgentState, EventData, EventType, IntentPayload, Task, KERNEL_ACTOR};

use crate::influence::{InfluenceQueue, PendingInfluence};
use crate::tasks::TaskRegistry;
use crate::{economy, escalation, reputation, sanction, tasks, tier, validation};

/// Caller-misuse errors. Policy rejections are never errors: they come
/// back as `Ok(false)` with the denial logged.
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("unknown agent: {agent_id}")]
    UnknownAgent { agent_id: String },
}

/// The governance kernel. Owns agent states, public keys, the task
/// registry, the influence queue, and the event log; there are no
/// process-wide singletons and no shared-mutable structures outside it.
#[derive(Default)]
pub struct Kernel {
    log: EventLog,
    agents: BTreeMap<String, AgentState>,
    public_keys: BTreeMap<String, VerifyingKey>,
    tasks: TaskRegistry,
    influence: InfluenceQueue,
}

impl Kernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent: seed its budget, default its reputation, and
    /// remember its verification key.
    pub fn register_agent(
        &mut self,
        agent_id: &str,
        public_key: VerifyingKey,
        initial_budget: f64,
    ) -> &AgentState {
        let mut state = AgentState::new(agent_id);
        self.public_keys.insert(agent_id.to_string(), public_key);
        self.log.append(
            EventType::AgentRegistered,
            agent_id,
            EventData::AgentRegistered { initial_budget },
        );
        economy::allocate(&mut state, initial_budget, &mut self.log);
        self.agents.insert(agent_id.to_string(), state);
        self.agents.get(agent_id).expect("inserted above")
    }

    pub fn register_task(&mut self, task: Task) {
        self.tasks.register(task);
    }

    /// Assign a registered task to an agent. Unknown task ids are a
    /// silent no-op, matching the lookup semantics of the handlers.
    pub fn assign_task_to_agent(&mut self, agent_id: &str, task_id: &str) -> Result<(), KernelError> {
        let state = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| KernelError::UnknownAgent {
                agent_id: agent_id.to_string(),
            })?;
        if let Some(task) = self.tasks.get(task_id) {
            tasks::assign_task(state, task, &mut self.log);
        }
        Ok(())
    }

    /// Read-only snapshot of an agent's state.
    pub fn get_state(&self, agent_id: &str) -> Option<&AgentState> {
        self.agents.get(agent_id)
    }

    /// All registered agents in stable (id) order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentState> {
        self.agents.values()
    }

    /// The verification key registered for an agent.
    pub fn public_key(&self, agent_id: &str) -> Option<&VerifyingKey> {
        self.public_keys.get(agent_id)
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn pending_influence_requests(&self) -> Vec<PendingInfluence> {
        self.influence.pending_requests()
    }

    pub fn record_round_start(&mut self, round: u32) {
        self.log
            .append(EventType::RoundStart, KERNEL_ACTOR, EventData::Round { round });
    }

    pub fn record_round_end(&mut self, round: u32) {
        self.log
            .append(EventType::RoundEnd, KERNEL_ACTOR, EventData::Round { round });
    }

    pub fn record_simulation_complete(&mut self, total_rounds: u32) {
        self.log.append(
            EventType::SimulationComplete,
            KERNEL_ACTOR,
            EventData::SimulationComplete { total_rounds },
        );
    }

    /// The single entry point for agent actions. Gates run strictly in
    /// order — ban, sandbox, signature — short-circuiting on the first
    /// failure, then the intent is dispatched by action.
    pub fn process_intent(
        &mut self,
        agent_id: &str,
        intent: &IntentPayload,
        signature: &[u8],
    ) -> Result<bool, KernelError> {
        let state = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| KernelError::UnknownAgent {
                agent_id: agent_id.to_string(),
            })?;

        // Gate 1: banned agents are fully silenced
        if state.banned {
            tracing::debug!(agent_id, action = %intent.action, "intent denied: banned");
            self.log.append(
                EventType::IntentDenied,
                agent_id,
                EventData::IntentDenied {
                    reason: "banned".to_string(),
                    action: intent.action.clone(),
                },
            );
            return Ok(false);
        }

        // Gate 2: sandboxed agents are restricted to the whitelist
        if state.sandboxed && !escalation::check_sandbox(state, &intent.action, &mut self.log) {
            return Ok(false);
        }

        // Gate 3: signature over the canonical payload encoding
        let known_key = self
            .public_keys
            .get(agent_id)
            .ok_or_else(|| KernelError::UnknownAgent {
                agent_id: agent_id.to_string(),
            })?;
        if !praetor_crypto::verify(known_key, &intent.canonical_bytes(), signature) {
            tracing::warn!(agent_id, action = %intent.action, "invalid signature");
            self.log.append(
                EventType::SignatureInvalid,
                agent_id,
                EventData::SignatureInvalid {
                    action: intent.action.clone(),
                },
            );
            sanction::record_violation(state, "invalid_signature", &mut self.log);
            return Ok(false);
        }

        // Authenticated: this is the audit record a verification sweep replays
        self.log.append_signed(
            EventType::IntentSubmitted,
            agent_id,
            EventData::IntentSubmitted {
                action: intent.action.clone(),
                task_id: intent.task_id.clone(),
                detail: intent.detail.clone(),
            },
            hex::encode(signature),
        );

        let task = self.tasks.get(&intent.task_id).cloned();
        let handled = match ActionKind::parse(&intent.action) {
            Some(ActionKind::WorkStep) => self.handle_work_step(agent_id, task.as_ref()),
            Some(ActionKind::SubmitResult) => {
                self.handle_submit(agent_id, task.as_ref(), &intent.detail)
            }
            Some(ActionKind::RequestEscalation) => {
                self.handle_escalation(agent_id, task.as_ref())
            }
            Some(ActionKind::RequestInfluence) => {
                self.handle_request_influence(agent_id, task.as_ref())
            }
            Some(ActionKind::ProvideInfluence) => {
                self.handle_provide_influence(agent_id, &intent.task_id, &intent.detail)
            }
            Some(ActionKind::TestBoundary) => {
                self.handle_test_boundary(agent_id, task.as_ref(), &intent.detail)
            }
            None => {
                self.log.append(
                    EventType::IntentDenied,
                    agent_id,
                    EventData::IntentDenied {
                        reason: "unknown_action".to_string(),
                        action: intent.action.clone(),
                    },
                );
                false
            }
        };
        Ok(handled)
    }

    fn handle_work_step(&mut self, agent_id: &str, task: Option<&Task>) -> bool {
        let Some(task) = task else {
            return false;
        };
        let Some(state) = self.agents.get_mut(agent_id) else {
            return false;
        };

        if !escalation::check_tier(state, task, &mut self.log) {
            record_violation_with_penalty(state, "tier_violation", "tier_violation", &mut self.log);
            return false;
        }

        if task.requires_influence && !escalation::check_influence(state, task, &mut self.log) {
            return false;
        }

        if !economy::debit(state, task.budget_cost_per_step, &mut self.log) {
            reputation::adjust(state, reputation::BUDGET_ABUSE, "budget_exceeded", &mut self.log);
            tier::evaluate(state, &mut self.log);
            return false;
        }

        tasks::record_step(state, task, &mut self.log);
        true
    }

    fn handle_submit(&mut self, agent_id: &str, task: Option<&Task>, submitted: &str) -> bool {
        let Some(task) = task else {
            return false;
        };
        let Some(state) = self.agents.get_mut(agent_id) else {
            return false;
        };

        if validation::validate_output(state, task, submitted, &mut self.log) {
            let efficient = state.current_task_steps <= task.required_steps;
            reputation::adjust(state, reputation::TASK_SUCCESS, "task_success", &mut self.log);
            if efficient {
                reputation::adjust(
                    state,
                    reputation::EFFICIENCY_BONUS,
                    "efficiency_bonus",
                    &mut self.log,
                );
            }
            tier::evaluate(state, &mut self.log);
            return true;
        }

        // Current policy: any mismatching submission is treated as
        // fabrication, including a first honest wrong attempt.
        self.log.append(
            EventType::DeceptionFlagged,
            agent_id,
            EventData::DeceptionFlagged {
                task_id: task.task_id.clone(),
                submitted: submitted.to_string(),
            },
        );
        reputation::adjust(state, reputation::DECEPTION, "deception", &mut self.log);
        sanction::record_violation(state, "deception", &mut self.log);
        tier::evaluate(state, &mut self.log);
        false
    }

    fn handle_escalation(&mut self, agent_id: &str, task: Option<&Task>) -> bool {
        let Some(task) = task else {
            return false;
        };
        let Some(state) = self.agents.get_mut(agent_id) else {
            return false;
        };

        if !escalation::check_tier(state, task, &mut self.log) {
            record_violation_with_penalty(
                state,
                "escalation_denied",
                "escalation_violation",
                &mut self.log,
            );
            return false;
        }
        // Sufficient tier: acknowledged, nothing else to do
        true
    }

    fn handle_request_influence(&mut self, agent_id: &str, task: Option<&Task>) -> bool {
        let Some(task) = task else {
            return false;
        };
        let Some(state) = self.agents.get_mut(agent_id) else {
            return false;
        };
        self.influence.request(state, &task.task_id, &mut self.log);
        true
    }

    fn handle_provide_influence(&mut self, agent_id: &str, task_id: &str, requester_id: &str) -> bool {
        if !self.agents.contains_key(requester_id) {
            return false;
        }

        if requester_id == agent_id {
            if let Some(state) = self.agents.get_mut(agent_id) {
                self.influence.fulfill_self(state, task_id, &mut self.log);
            }
        } else if let Some(mut requester) = self.agents.remove(requester_id) {
            if let Some(provider) = self.agents.get_mut(agent_id) {
                self.influence
                    .fulfill(provider, &mut requester, task_id, &mut self.log);
            }
            self.agents.insert(requester_id.to_string(), requester);
        }

        if let Some(provider) = self.agents.get_mut(agent_id) {
            reputation::adjust(
                provider,
                reputation::PROVIDE_INFLUENCE,
                "provide_influence",
                &mut self.log,
            );
            tier::evaluate(provider, &mut self.log);
        }
        true
    }

    fn handle_test_boundary(&mut self, agent_id: &str, task: Option<&Task>, detail: &str) -> bool {
        let Some(state) = self.agents.get_mut(agent_id) else {
            return false;
        };

        if detail == "access_privileged" {
            if let Some(task) = task {
                if escalation::check_tier(state, task, &mut self.log) {
                    // The probe found a door it was entitled to open
                    return true;
                }
                record_violation_with_penalty(
                    state,
                    "boundary_test_tier",
                    "boundary_violation",
                    &mut self.log,
                );
                return false;
            }
        }

        let reason = match detail {
            "act_while_sandboxed" => "boundary_test_sandbox".to_string(),
            "forge_signature" => "boundary_test_forgery".to_string(),
            "exceed_budget" => "boundary_test_budget".to_string(),
            probe => format!("boundary_test_{probe}"),
        };
        record_violation_with_penalty(state, &reason, "boundary_violation", &mut self.log);
        false
    }
}

/// The violation/penalty/tier-reevaluation triple applied to every
/// authorization failure that counts as misconduct.
fn record_violation_with_penalty(
    state: &mut AgentState,
    violation_reason: &str,
    penalty_reason: &str,
    log: &mut EventLog,
) {
    sanction::record_violation(state, violation_reason, log);
    reputation::adjust(state, reputation::BOUNDARY_VIOLATION, penalty_reason, log);
    tier::evaluate(state, log);
}
