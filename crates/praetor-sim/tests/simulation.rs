//! End-to-end runs of the standard scenario: governance outcomes,
//! determinism, and audit sweeps over the full event log.

use praetor_sim::{report, Simulation, NUM_ROUNDS};
use praetor_types::{EventData, EventType};

fn run_standard() -> Simulation {
    let mut sim = Simulation::standard().unwrap();
    sim.run().unwrap();
    sim
}

#[test]
fn test_two_runs_produce_identical_logs() {
    let a = run_standard();
    let b = run_standard();

    let log_a = a.kernel().log().to_json().unwrap();
    let log_b = b.kernel().log().to_json().unwrap();
    assert!(!a.kernel().log().is_empty());
    assert_eq!(log_a, log_b);
}

#[test]
fn test_efficient_agent_reaches_tier_two() {
    let sim = run_standard();
    let state = sim.kernel().get_state("efficient-1").unwrap();
    assert!(state.tier >= 2, "expected tier >= 2, got {}", state.tier);
    assert!(state.tasks_completed >= 1);
    assert!(!state.banned);
}

#[test]
fn test_deceptive_agent_is_banned() {
    let sim = run_standard();
    let state = sim.kernel().get_state("deceptive-1").unwrap();
    assert!(state.banned);

    let flags = sim
        .kernel()
        .log()
        .events_of_type(EventType::DeceptionFlagged)
        .filter(|e| e.agent_id == "deceptive-1")
        .count();
    assert!(flags >= 2, "expected >= 2 deception flags, got {flags}");
}

#[test]
fn test_looper_agent_exhausts_budget() {
    let sim = run_standard();
    let state = sim.kernel().get_state("looper-1").unwrap();
    assert_eq!(state.budget, 0.0);
}

#[test]
fn test_specialist_agent_succeeds_via_influence() {
    let sim = run_standard();
    let state = sim.kernel().get_state("specialist-1").unwrap();
    assert!(state.tasks_completed >= 1);
    assert!(state.has_received_influence);

    let fulfilled = sim
        .kernel()
        .log()
        .events_of_type(EventType::InfluenceFulfilled)
        .filter(|e| e.agent_id == "specialist-1")
        .count();
    assert!(fulfilled >= 1);
}

#[test]
fn test_naive_agent_completes_without_bonus() {
    let sim = run_standard();
    let state = sim.kernel().get_state("naive-1").unwrap();
    assert!(!state.banned);
    assert!(state.tasks_completed >= 1);

    // Twice the required steps: validated, but never efficient
    let inefficient = sim
        .kernel()
        .log()
        .events_of_type(EventType::TaskValidated)
        .filter(|e| e.agent_id == "naive-1")
        .all(|e| matches!(e.data, EventData::TaskValidated { efficient: false, .. }));
    assert!(inefficient);
}

#[test]
fn test_boundary_agent_is_sanctioned() {
    let sim = run_standard();
    let state = sim.kernel().get_state("boundary-1").unwrap();
    assert!(state.sandboxed || state.banned);
    assert!(
        state.violation_count >= 2,
        "expected >= 2 violations, got {}",
        state.violation_count
    );
}

#[test]
fn test_signature_sweep_verifies_every_intent() {
    let sim = run_standard();
    let (total, verified, failed) = report::signature_sweep(sim.kernel());
    assert!(total > 0);
    assert_eq!(verified, total);
    assert_eq!(failed, 0);
}

#[test]
fn test_log_sequences_are_contiguous() {
    let sim = run_standard();
    for (i, event) in sim.kernel().log().events().iter().enumerate() {
        assert_eq!(event.sequence, i as u64);
    }
}

#[test]
fn test_no_intents_recorded_after_ban() {
    let sim = run_standard();
    assert_eq!(report::post_ban_intents(sim.kernel().log().events()), 0);
}

#[test]
fn test_round_markers_bracket_every_round() {
    let sim = run_standard();
    let log = sim.kernel().log();
    assert_eq!(
        log.events_of_type(EventType::RoundStart).count(),
        NUM_ROUNDS as usize
    );
    assert_eq!(
        log.events_of_type(EventType::RoundEnd).count(),
        NUM_ROUNDS as usize
    );
    assert_eq!(log.events_of_type(EventType::SimulationComplete).count(), 1);

    let last = log.events().last().unwrap();
    assert_eq!(last.event_type, EventType::SimulationComplete);
}

#[test]
fn test_report_renders_all_sections() {
    let sim = run_standard();
    let report = report::generate(sim.kernel());
    for section in [
        "AGENT OUTCOMES",
        "GOVERNANCE EVENTS",
        "INFLUENCE CHAINS",
        "SIGNATURE VERIFICATION SWEEP",
        "LOG INTEGRITY",
    ] {
        assert!(report.contains(section), "missing section {section}");
    }
    assert!(report.contains("efficient-1"));
    assert!(report.contains("Post-ban intents:  0"));
}
