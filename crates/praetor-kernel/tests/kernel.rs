use praetor_crypto::KeyPair;
use praetor_kernel::Kernel;
use praetor_types::{ActionKind, EventData, EventType, IntentPayload, Task};

fn easy_task(id: &str) -> Task {
    Task {
        task_id: id.to_string(),
        difficulty: "easy".to_string(),
        required_steps: 3,
        expected_output: "55".to_string(),
        budget_cost_per_step: 5.0,
        requires_tier: 0,
        requires_influence: false,
    }
}

fn privileged_task(id: &str) -> Task {
    Task {
        task_id: id.to_string(),
        difficulty: "hard".to_string(),
        required_steps: 4,
        expected_output: "DATASET_HASH:abc123".to_string(),
        budget_cost_per_step: 10.0,
        requires_tier: 2,
        requires_influence: false,
    }
}

fn influence_task(id: &str) -> Task {
    Task {
        task_id: id.to_string(),
        difficulty: "hard".to_string(),
        required_steps: 5,
        expected_output: "FACTORED:7x13".to_string(),
        budget_cost_per_step: 8.0,
        requires_tier: 0,
        requires_influence: true,
    }
}

struct Harness {
    kernel: Kernel,
}

impl Harness {
    fn new() -> Self {
        Self {
            kernel: Kernel::new(),
        }
    }

    fn register(&mut self, agent_id: &str, budget: f64) -> KeyPair {
        let keypair = KeyPair::derive(agent_id);
        self.kernel
            .register_agent(agent_id, *keypair.verifying_key(), budget);
        keypair
    }

    fn submit(&mut self, agent_id: &str, intent: &IntentPayload) -> bool {
        let keypair = KeyPair::derive(agent_id);
        let sig = keypair.sign(&intent.canonical_bytes());
        self.kernel
            .process_intent(agent_id, intent, &sig)
            .expect("registered agent")
    }
}

#[test]
fn test_unknown_agent_is_an_error() {
    let mut kernel = Kernel::new();
    let intent = IntentPayload::new(ActionKind::WorkStep, "task-1", "");
    assert!(kernel.process_intent("ghost", &intent, b"sig").is_err());
}

#[test]
fn test_work_step_records_step_and_debits() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);
    h.kernel.assign_task_to_agent("agent-1", "task-1").unwrap();

    assert!(h.submit("agent-1", &IntentPayload::new(ActionKind::WorkStep, "task-1", "")));

    let state = h.kernel.get_state("agent-1").unwrap();
    assert_eq!(state.budget, 95.0);
    assert_eq!(state.current_task_steps, 1);
    assert_eq!(state.steps_taken, 1);
    assert_eq!(h.kernel.log().events_of_type(EventType::TaskStep).count(), 1);
}

#[test]
fn test_work_step_on_unknown_task_fails_silently() {
    let mut h = Harness::new();
    h.register("agent-1", 100.0);

    let before = h.kernel.log().len();
    assert!(!h.submit("agent-1", &IntentPayload::new(ActionKind::WorkStep, "no-such-task", "")));
    // Only the INTENT_SUBMITTED audit record, nothing else
    assert_eq!(h.kernel.log().len(), before + 1);
}

#[test]
fn test_forged_signature_rejected_and_penalized() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);
    h.register("agent-2", 100.0);

    let intent = IntentPayload::new(ActionKind::WorkStep, "task-1", "");
    let forged = KeyPair::derive("agent-2").sign(&intent.canonical_bytes());
    let ok = h
        .kernel
        .process_intent("agent-1", &intent, &forged)
        .unwrap();

    assert!(!ok);
    assert_eq!(
        h.kernel.log().events_of_type(EventType::SignatureInvalid).count(),
        1
    );
    let state = h.kernel.get_state("agent-1").unwrap();
    assert_eq!(state.violation_count, 1);
    // No INTENT_SUBMITTED for the forged attempt
    assert_eq!(
        h.kernel.log().events_of_type(EventType::IntentSubmitted).count(),
        0
    );
}

#[test]
fn test_unknown_action_denied_without_side_effects() {
    let mut h = Harness::new();
    h.register("agent-1", 100.0);

    let intent = IntentPayload::raw("steal_funds", "task-1", "");
    assert!(!h.submit("agent-1", &intent));

    let denied: Vec<_> = h
        .kernel
        .log()
        .events_of_type(EventType::IntentDenied)
        .collect();
    assert_eq!(denied.len(), 1);
    match &denied[0].data {
        EventData::IntentDenied { reason, action } => {
            assert_eq!(reason, "unknown_action");
            assert_eq!(action, "steal_funds");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
    let state = h.kernel.get_state("agent-1").unwrap();
    assert_eq!(state.violation_count, 0);
    assert_eq!(state.reputation, 0.50);
}

#[test]
fn test_scenario_budget_exhaustion() {
    // 100 budget at 5 per step: 20 steps succeed, the 21st defunds
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);
    h.kernel.assign_task_to_agent("agent-1", "task-1").unwrap();

    let step = IntentPayload::new(ActionKind::WorkStep, "task-1", "");
    for i in 0..20 {
        assert!(h.submit("agent-1", &step), "step {i} should succeed");
    }
    assert_eq!(h.kernel.get_state("agent-1").unwrap().budget, 0.0);

    assert!(!h.submit("agent-1", &step));
    let log = h.kernel.log();
    assert_eq!(log.events_of_type(EventType::BudgetExceeded).count(), 1);
    assert_eq!(log.events_of_type(EventType::BudgetDefunded).count(), 1);

    let state = h.kernel.get_state("agent-1").unwrap();
    assert_eq!(state.budget, 0.0);
    // Economic failure is not misconduct
    assert_eq!(state.violation_count, 0);
    assert!(state.reputation < 0.50);
}

#[test]
fn test_scenario_deception_to_sandbox_to_ban() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);
    h.kernel.assign_task_to_agent("agent-1", "task-1").unwrap();

    // Two fabricated submissions: two deception flags, sandboxed
    for attempt in 1..=2 {
        let intent = IntentPayload::new(
            ActionKind::SubmitResult,
            "task-1",
            format!("FAKE_OUTPUT_{attempt}"),
        );
        assert!(!h.submit("agent-1", &intent));
    }
    {
        let log = h.kernel.log();
        assert_eq!(log.events_of_type(EventType::DeceptionFlagged).count(), 2);
        assert_eq!(log.events_of_type(EventType::AgentSandboxed).count(), 1);
    }
    let state = h.kernel.get_state("agent-1").unwrap();
    assert!(state.sandboxed);
    assert_eq!(state.violation_count, 2);

    // Two more: banned. submit_result stays sandbox-whitelisted so the
    // deceptions keep landing.
    for attempt in 3..=4 {
        let intent = IntentPayload::new(
            ActionKind::SubmitResult,
            "task-1",
            format!("FAKE_OUTPUT_{attempt}"),
        );
        assert!(!h.submit("agent-1", &intent));
    }
    assert!(h.kernel.get_state("agent-1").unwrap().banned);
    assert_eq!(
        h.kernel.log().events_of_type(EventType::AgentBanned).count(),
        1
    );

    // Fully silenced afterwards
    let ban_seq = h
        .kernel
        .log()
        .events_of_type(EventType::AgentBanned)
        .next()
        .unwrap()
        .sequence;
    assert!(!h.submit("agent-1", &IntentPayload::new(ActionKind::WorkStep, "task-1", "")));
    let log = h.kernel.log();
    let last = log.events().last().unwrap();
    assert_eq!(last.event_type, EventType::IntentDenied);
    match &last.data {
        EventData::IntentDenied { reason, .. } => assert_eq!(reason, "banned"),
        other => panic!("unexpected payload: {other:?}"),
    }
    assert!(log
        .events_of_type(EventType::IntentSubmitted)
        .all(|e| e.agent_id != "agent-1" || e.sequence < ban_seq));
}

#[test]
fn test_sandboxed_agent_restricted_to_whitelist() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);
    h.kernel.assign_task_to_agent("agent-1", "task-1").unwrap();

    // Sandbox via two deceptions
    for _ in 0..2 {
        h.submit(
            "agent-1",
            &IntentPayload::new(ActionKind::SubmitResult, "task-1", "WRONG"),
        );
    }
    assert!(h.kernel.get_state("agent-1").unwrap().sandboxed);

    // Whitelisted action still allowed
    assert!(h.submit("agent-1", &IntentPayload::new(ActionKind::WorkStep, "task-1", "")));

    // Escalation attempt blocked at the sandbox gate
    assert!(!h.submit(
        "agent-1",
        &IntentPayload::new(ActionKind::RequestEscalation, "task-1", "")
    ));
    let denial = h
        .kernel
        .log()
        .events_of_type(EventType::EscalationDenied)
        .last()
        .unwrap();
    match &denial.data {
        EventData::EscalationDeniedSandbox {
            reason,
            attempted_action,
        } => {
            assert_eq!(reason, "sandboxed");
            assert_eq!(attempted_action, "request_escalation");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn test_tier_gate_on_privileged_task() {
    let mut h = Harness::new();
    h.kernel.register_task(privileged_task("task-priv"));
    h.register("agent-1", 100.0);

    assert!(!h.submit("agent-1", &IntentPayload::new(ActionKind::WorkStep, "task-priv", "")));

    let state = h.kernel.get_state("agent-1").unwrap();
    assert_eq!(state.violation_count, 1);
    assert!(state.reputation < 0.50);
    let denial = h
        .kernel
        .log()
        .events_of_type(EventType::EscalationDenied)
        .next()
        .unwrap();
    match &denial.data {
        EventData::EscalationDeniedTier {
            reason,
            required,
            current,
            ..
        } => {
            assert_eq!(reason, "insufficient_tier");
            assert_eq!(*required, 2);
            assert_eq!(*current, 0);
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn test_scenario_influence_unlock() {
    let mut h = Harness::new();
    h.kernel.register_task(influence_task("task-hard"));
    h.register("requester", 100.0);
    h.register("provider", 100.0);
    h.kernel.assign_task_to_agent("requester", "task-hard").unwrap();

    // Work on an influence-gated task is denied before the unlock
    assert!(!h.submit("requester", &IntentPayload::new(ActionKind::WorkStep, "task-hard", "")));

    assert!(h.submit(
        "requester",
        &IntentPayload::new(ActionKind::RequestInfluence, "task-hard", "")
    ));
    let pending = h.kernel.pending_influence_requests();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].requester_id, "requester");

    assert!(h.submit(
        "provider",
        &IntentPayload::new(ActionKind::ProvideInfluence, "task-hard", "requester")
    ));

    let log = h.kernel.log();
    assert_eq!(log.events_of_type(EventType::InfluenceRequested).count(), 1);
    assert_eq!(log.events_of_type(EventType::InfluenceProvided).count(), 1);
    assert_eq!(log.events_of_type(EventType::InfluenceFulfilled).count(), 1);
    assert!(h.kernel.pending_influence_requests().is_empty());

    // The unlock sticks: work steps now pass the influence check
    assert!(h.submit("requester", &IntentPayload::new(ActionKind::WorkStep, "task-hard", "")));

    // Provider earned the collaboration bonus
    let provider = h.kernel.get_state("provider").unwrap();
    assert!((provider.reputation - 0.58).abs() < 1e-9);
}

#[test]
fn test_provide_influence_for_unknown_requester_fails() {
    let mut h = Harness::new();
    h.kernel.register_task(influence_task("task-hard"));
    h.register("provider", 100.0);

    assert!(!h.submit(
        "provider",
        &IntentPayload::new(ActionKind::ProvideInfluence, "task-hard", "nobody")
    ));
    assert_eq!(
        h.kernel.log().events_of_type(EventType::InfluenceProvided).count(),
        0
    );
}

#[test]
fn test_scenario_efficient_success() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);
    h.kernel.assign_task_to_agent("agent-1", "task-1").unwrap();

    for _ in 0..3 {
        assert!(h.submit("agent-1", &IntentPayload::new(ActionKind::WorkStep, "task-1", "")));
    }
    assert!(h.submit("agent-1", &IntentPayload::new(ActionKind::SubmitResult, "task-1", "55")));

    let log = h.kernel.log();
    let validated = log.events_of_type(EventType::TaskValidated).next().unwrap();
    match &validated.data {
        EventData::TaskValidated { efficient, .. } => assert!(*efficient),
        other => panic!("unexpected payload: {other:?}"),
    }

    let reasons: Vec<String> = log
        .events_of_type(EventType::ReputationAdjusted)
        .filter_map(|e| match &e.data {
            EventData::ReputationAdjusted { reason, .. } => Some(reason.clone()),
            _ => None,
        })
        .collect();
    assert!(reasons.contains(&"task_success".to_string()));
    assert!(reasons.contains(&"efficiency_bonus".to_string()));

    let state = h.kernel.get_state("agent-1").unwrap();
    assert_eq!(state.tasks_completed, 1);
    // 0.50 + 0.10 + 0.05 clears the tier-1 threshold
    assert_eq!(state.tier, 1);
}

#[test]
fn test_request_escalation_acknowledged_when_tier_sufficient() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);

    assert!(h.submit(
        "agent-1",
        &IntentPayload::new(ActionKind::RequestEscalation, "task-1", "")
    ));
    assert_eq!(h.kernel.get_state("agent-1").unwrap().violation_count, 0);
}

#[test]
fn test_boundary_probes_are_sanctioned() {
    let mut h = Harness::new();
    h.kernel.register_task(privileged_task("task-priv"));
    h.register("agent-1", 100.0);

    for probe in [
        "access_privileged",
        "forge_signature",
        "act_while_sandboxed",
        "exceed_budget",
    ] {
        assert!(!h.submit(
            "agent-1",
            &IntentPayload::new(ActionKind::TestBoundary, "task-priv", probe)
        ));
    }

    // Two probes land violations; the sandbox then blocks the rest at
    // gate 2, before dispatch, so the counter stops at 2.
    let state = h.kernel.get_state("agent-1").unwrap();
    assert_eq!(state.violation_count, 2);
    assert!(state.sandboxed);
    assert!(!state.banned);

    let reasons: Vec<String> = h
        .kernel
        .log()
        .events_of_type(EventType::ViolationRecorded)
        .filter_map(|e| match &e.data {
            EventData::ViolationRecorded { reason, .. } => Some(reason.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(reasons, vec!["boundary_test_tier", "boundary_test_forgery"]);

    let sandbox_denials = h
        .kernel
        .log()
        .events_of_type(EventType::EscalationDenied)
        .filter(|e| {
            matches!(
                &e.data,
                EventData::EscalationDeniedSandbox { attempted_action, .. }
                    if attempted_action == "test_boundary"
            )
        })
        .count();
    assert_eq!(sandbox_denials, 2);
}

#[test]
fn test_boundary_probe_with_sufficient_tier_passes() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.register("agent-1", 100.0);

    assert!(h.submit(
        "agent-1",
        &IntentPayload::new(ActionKind::TestBoundary, "task-1", "access_privileged")
    ));
    assert_eq!(h.kernel.get_state("agent-1").unwrap().violation_count, 0);
}

#[test]
fn test_unrecognized_probe_is_generic_violation() {
    let mut h = Harness::new();
    h.register("agent-1", 100.0);

    assert!(!h.submit(
        "agent-1",
        &IntentPayload::new(ActionKind::TestBoundary, "", "zero_day")
    ));
    let violation = h
        .kernel
        .log()
        .events_of_type(EventType::ViolationRecorded)
        .next()
        .unwrap();
    match &violation.data {
        EventData::ViolationRecorded { reason, .. } => {
            assert_eq!(reason, "boundary_test_zero_day");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn test_sequence_contiguity_across_a_busy_run() {
    let mut h = Harness::new();
    h.kernel.register_task(easy_task("task-1"));
    h.kernel.register_task(privileged_task("task-priv"));
    h.register("agent-1", 40.0);
    h.register("agent-2", 100.0);
    h.kernel.assign_task_to_agent("agent-1", "task-1").unwrap();

    for _ in 0..10 {
        h.submit("agent-1", &IntentPayload::new(ActionKind::WorkStep, "task-1", ""));
        h.submit("agent-2", &IntentPayload::new(ActionKind::WorkStep, "task-priv", ""));
        h.submit(
            "agent-2",
            &IntentPayload::new(ActionKind::SubmitResult, "task-priv", "bogus"),
        );
    }

    for (i, event) in h.kernel.log().events().iter().enumerate() {
        assert_eq!(event.sequence, i as u64);
    }
}
