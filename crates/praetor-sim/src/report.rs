//! Human-readable run report: outcomes, sanctions, and audit sweeps

use praetor_kernel::Kernel;
use praetor_types::{Event, EventData, EventType, IntentPayload};

const RULE: &str = "----------------------------------------";

/// Render the post-run report for a kernel: per-agent outcomes, notable
/// governance events, influence chains, a full signature re-verification
/// sweep, and log integrity checks.
pub fn generate(kernel: &Kernel) -> String {
    let mut lines: Vec<String> = Vec::new();
    let log = kernel.log();

    lines.push("=".repeat(60));
    lines.push("PRAETOR KERNEL - SIMULATION REPORT".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.push("AGENT OUTCOMES".to_string());
    lines.push(RULE.to_string());
    for state in kernel.agents() {
        lines.push(format!("\n  Agent: {}", state.agent_id));
        lines.push(format!("    Budget:       {:.2}", state.budget));
        lines.push(format!("    Reputation:   {:.4}", state.reputation));
        lines.push(format!("    Tier:         {}", state.tier));
        lines.push(format!("    Sandboxed:    {}", state.sandboxed));
        lines.push(format!("    Banned:       {}", state.banned));
        lines.push(format!("    Violations:   {}", state.violation_count));
        lines.push(format!("    Tasks Done:   {}", state.tasks_completed));
        lines.push(format!("    Tasks Failed: {}", state.tasks_failed));
        lines.push(format!("    Steps Taken:  {}", state.steps_taken));
    }

    lines.push(String::new());
    lines.push("GOVERNANCE EVENTS".to_string());
    lines.push(RULE.to_string());
    for event_type in [
        EventType::AgentSandboxed,
        EventType::AgentBanned,
        EventType::DeceptionFlagged,
        EventType::BudgetExceeded,
        EventType::BudgetDefunded,
        EventType::EscalationDenied,
        EventType::TierUpgraded,
        EventType::TierDowngraded,
    ] {
        let events: Vec<&Event> = log.events_of_type(event_type).collect();
        if events.is_empty() {
            continue;
        }
        lines.push(format!("\n  {event_type} ({} events):", events.len()));
        for e in events {
            let data = serde_json::to_string(&e.data).unwrap_or_default();
            lines.push(format!(
                "    seq={} agent={} {}",
                e.sequence, e.agent_id, data
            ));
        }
    }

    lines.push(String::new());
    lines.push("INFLUENCE CHAINS".to_string());
    lines.push(RULE.to_string());
    let mut any_influence = false;
    for e in log.events_of_type(EventType::InfluenceRequested) {
        if let EventData::InfluenceRequested { task_id } = &e.data {
            any_influence = true;
            lines.push(format!(
                "  REQUEST:   seq={} agent={} task={}",
                e.sequence, e.agent_id, task_id
            ));
        }
    }
    for e in log.events_of_type(EventType::InfluenceProvided) {
        if let EventData::InfluenceProvided { to, task_id } = &e.data {
            any_influence = true;
            lines.push(format!(
                "  PROVIDED:  seq={} agent={} -> {} task={}",
                e.sequence, e.agent_id, to, task_id
            ));
        }
    }
    for e in log.events_of_type(EventType::InfluenceFulfilled) {
        if let EventData::InfluenceFulfilled { from, task_id } = &e.data {
            any_influence = true;
            lines.push(format!(
                "  FULFILLED: seq={} agent={} <- {} task={}",
                e.sequence, e.agent_id, from, task_id
            ));
        }
    }
    if !any_influence {
        lines.push("  (none)".to_string());
    }

    lines.push(String::new());
    lines.push("SIGNATURE VERIFICATION SWEEP".to_string());
    lines.push(RULE.to_string());
    let (total, verified, failed) = signature_sweep(kernel);
    lines.push(format!("  Total INTENT_SUBMITTED events: {total}"));
    lines.push(format!("  Verified:   {verified}"));
    lines.push(format!("  Failed:     {failed}"));

    lines.push(String::new());
    lines.push("LOG INTEGRITY".to_string());
    lines.push(RULE.to_string());
    let events = log.events();
    let contiguous = events
        .iter()
        .enumerate()
        .all(|(i, e)| e.sequence == i as u64);
    lines.push(format!("  Total events:      {}", events.len()));
    lines.push(format!("  Contiguous seqs:   {contiguous}"));
    lines.push(format!("  Post-ban intents:  {}", post_ban_intents(events)));

    lines.push(String::new());
    lines.push("=".repeat(60));
    lines.push("END OF REPORT".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.join("\n")
}

/// Re-verify every recorded intent signature against the registered key
/// and the reconstructed canonical payload bytes.
pub fn signature_sweep(kernel: &Kernel) -> (usize, usize, usize) {
    let mut total = 0;
    let mut verified = 0;
    let mut failed = 0;
    for e in kernel.log().events_of_type(EventType::IntentSubmitted) {
        total += 1;
        if e.signature.is_empty() {
            continue;
        }
        let Some(key) = kernel.public_key(&e.agent_id) else {
            continue;
        };
        let EventData::IntentSubmitted {
            action,
            task_id,
            detail,
        } = &e.data
        else {
            continue;
        };
        let payload = IntentPayload::raw(action.as_str(), task_id.as_str(), detail.as_str());
        let Ok(signature) = hex::decode(&e.signature) else {
            failed += 1;
            continue;
        };
        if praetor_crypto::verify(key, &payload.canonical_bytes(), &signature) {
            verified += 1;
        } else {
            failed += 1;
        }
    }
    (total, verified, failed)
}

/// Count INTENT_SUBMITTED events recorded for an agent after its ban.
pub fn post_ban_intents(events: &[Event]) -> usize {
    let banned_at: Vec<(&str, u64)> = events
        .iter()
        .filter(|e| e.event_type == EventType::AgentBanned)
        .map(|e| (e.agent_id.as_str(), e.sequence))
        .collect();
    events
        .iter()
        .filter(|e| e.event_type == EventType::IntentSubmitted)
        .filter(|e| {
            banned_at
                .iter()
                .any(|(agent, seq)| *agent == e.agent_id && e.sequence > *seq)
        })
        .count()
}
