//! Event records for the append-only audit log
//!
//! Every consequential kernel action produces exactly one event. The
//! `EventType` enumeration is closed; `EventData` carries one struct
//! variant per payload schema so handlers get compile-time guarantees
//! about the fields each consumer expects, while still serializing to
//! the generic `{key: value}` wire shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed enumeration of everything the kernel can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    // Agent lifecycle
    AgentRegistered,
    AgentSandboxed,
    AgentBanned,

    // Intent pipeline
    IntentSubmitted,
    IntentDenied,

    // Economy
    BudgetAllocated,
    BudgetDebited,
    BudgetExceeded,
    BudgetDefunded,

    // Reputation & tiering
    ReputationAdjusted,
    TierUpgraded,
    TierDowngraded,

    // Escalation
    EscalationDenied,

    // Tasks
    TaskAssigned,
    TaskStep,
    TaskSubmitted,
    TaskValidated,
    TaskFailed,

    // Deception
    DeceptionFlagged,

    // Influence
    InfluenceRequested,
    InfluenceProvided,
    InfluenceFulfilled,

    // Violations
    ViolationRecorded,
    SignatureInvalid,

    // Round markers
    RoundStart,
    RoundEnd,
    SimulationComplete,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse the serde rename so logs and wire format agree
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", s.trim_matches('"'))
    }
}

/// Typed event payloads, one variant per schema.
///
/// Serializes untagged: the wire shape is the bare payload object, with
/// the discriminant carried by the sibling `event_type` field on [`Event`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    AgentRegistered {
        initial_budget: f64,
    },
    Sanction {
        violation_count: u32,
    },
    IntentSubmitted {
        action: String,
        task_id: String,
        detail: String,
    },
    IntentDenied {
        reason: String,
        action: String,
    },
    SignatureInvalid {
        action: String,
    },
    BudgetMovement {
        amount: f64,
        new_balance: f64,
    },
    BudgetExceeded {
        attempted: f64,
        balance: f64,
    },
    BudgetDefunded {
        new_balance: f64,
    },
    ReputationAdjusted {
        old: f64,
        new: f64,
        delta: f64,
        reason: String,
    },
    TierChanged {
        old_tier: u8,
        new_tier: u8,
        reputation: f64,
    },
    EscalationDeniedTier {
        reason: String,
        required: u8,
        current: u8,
        task_id: String,
    },
    EscalationDeniedSandbox {
        reason: String,
        attempted_action: String,
    },
    EscalationDeniedInfluence {
        reason: String,
        task_id: String,
    },
    TaskAssigned {
        task_id: String,
        required_steps: u32,
    },
    TaskStep {
        task_id: String,
        step: u32,
    },
    TaskSubmitted {
        task_id: String,
        output: String,
    },
    TaskValidated {
        task_id: String,
        efficient: bool,
    },
    TaskFailed {
        task_id: String,
        expected: String,
        got: String,
    },
    DeceptionFlagged {
        task_id: String,
        submitted: String,
    },
    InfluenceRequested {
        task_id: String,
    },
    InfluenceProvided {
        to: String,
        task_id: String,
    },
    InfluenceFulfilled {
        from: String,
        task_id: String,
    },
    ViolationRecorded {
        count: u32,
        reason: String,
    },
    Round {
        round: u32,
    },
    SimulationComplete {
        total_rounds: u32,
    },
}

/// One immutable entry in the audit log.
///
/// Field order here is the persisted field order; do not reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub sequence: u64,
    pub timestamp: String,
    pub event_type: EventType,
    pub agent_id: String,
    pub data: EventData,
    pub signature: String,
}
