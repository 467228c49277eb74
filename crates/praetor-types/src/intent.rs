//! Signed intent payloads
//!
//! An intent is the one message type agents send the kernel. The canonical
//! byte encoding used for signing is JSON with keys in alphabetical order
//! (`action`, `detail`, `task_id`); signature generation and the audit
//! verification sweep must both reconstruct these exact bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The actions the kernel knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    WorkStep,
    SubmitResult,
    RequestEscalation,
    RequestInfluence,
    ProvideInfluence,
    TestBoundary,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkStep => "work_step",
            Self::SubmitResult => "submit_result",
            Self::RequestEscalation => "request_escalation",
            Self::RequestInfluence => "request_influence",
            Self::ProvideInfluence => "provide_influence",
            Self::TestBoundary => "test_boundary",
        }
    }

    /// Parse a wire action name. Unknown names are not an error here;
    /// the pipeline rejects them with `INTENT_DENIED{unknown_action}`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "work_step" => Some(Self::WorkStep),
            "submit_result" => Some(Self::SubmitResult),
            "request_escalation" => Some(Self::RequestEscalation),
            "request_influence" => Some(Self::RequestInfluence),
            "provide_influence" => Some(Self::ProvideInfluence),
            "test_boundary" => Some(Self::TestBoundary),
            _ => None,
        }
    }

    /// Actions a sandboxed agent is still permitted to perform.
    pub fn sandbox_whitelisted(action: &str) -> bool {
        matches!(action, "work_step" | "submit_result")
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed message: one desired action against one task.
///
/// `action` stays a string on the wire so unrecognized probes can still be
/// carried, authenticated, and then rejected by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentPayload {
    pub action: String,
    pub task_id: String,
    pub detail: String,
}

impl IntentPayload {
    pub fn new(action: ActionKind, task_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            action: action.as_str().to_string(),
            task_id: task_id.into(),
            detail: detail.into(),
        }
    }

    /// An intent with an arbitrary action name, for boundary probes.
    pub fn raw(
        action: impl Into<String>,
        task_id: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            task_id: task_id.into(),
            detail: detail.into(),
        }
    }

    /// Canonical byte encoding for signing: compact JSON, keys in
    /// alphabetical order.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        #[derive(Serialize)]
        struct Canonical<'a> {
            action: &'a str,
            detail: &'a str,
            task_id: &'a str,
        }
        // Struct fields serialize in declared order, which is already
        // alphabetical here. Serialization of three borrowed strings
        // cannot fail.
        serde_json::to_vec(&Canonical {
            action: &self.action,
            detail: &self.detail,
            task_id: &self.task_id,
        })
        .unwrap_or_default()
    }
}
