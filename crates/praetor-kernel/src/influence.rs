//! Influence queue: cross-agent request/fulfillment matching

use praetor_audit::EventLog;
use praetor_types::{AgentState, EventData, EventType};
use serde::{Deserialize, Serialize};

/// A pending cross-agent influence request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingInfluence {
    pub requester_id: String,
    pub task_id: String,
}

/// Pending requests, created on request and destroyed on fulfillment.
#[derive(Debug, Default)]
pub struct InfluenceQueue {
    requests: Vec<PendingInfluence>,
}

impl InfluenceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a request and record it in the requester's history.
    pub fn request(&mut self, requester: &mut AgentState, task_id: &str, log: &mut EventLog) {
        self.requests.push(PendingInfluence {
            requester_id: requester.agent_id.clone(),
            task_id: task_id.to_string(),
        });
        requester.influence_requests.push(task_id.to_string());
        log.append(
            EventType::InfluenceRequested,
            &requester.agent_id,
            EventData::InfluenceRequested {
                task_id: task_id.to_string(),
            },
        );
    }

    /// Snapshot of the queue for schedulers to poll between rounds.
    pub fn pending_requests(&self) -> Vec<PendingInfluence> {
        self.requests.clone()
    }

    /// Fulfill a request: two events bracket the fulfillment so audit
    /// trails show both directions. Removes every pending entry matching
    /// `(requester, task_id)` in case of duplicate requests.
    pub fn fulfill(
        &mut self,
        provider: &mut AgentState,
        requester: &mut AgentState,
        task_id: &str,
        log: &mut EventLog,
    ) {
        log.append(
            EventType::InfluenceProvided,
            &provider.agent_id,
            EventData::InfluenceProvided {
                to: requester.agent_id.clone(),
                task_id: task_id.to_string(),
            },
        );
        provider.influence_provided.push(task_id.to_string());
        requester.has_received_influence = true;
        self.remove_matching(&requester.agent_id, task_id);
        log.append(
            EventType::InfluenceFulfilled,
            &requester.agent_id,
            EventData::InfluenceFulfilled {
                from: provider.agent_id.clone(),
                task_id: task_id.to_string(),
            },
        );
    }

    /// Degenerate fulfillment where provider and requester are the same
    /// agent. Same events, same queue cleanup, one state.
    pub fn fulfill_self(&mut self, state: &mut AgentState, task_id: &str, log: &mut EventLog) {
        log.append(
            EventType::InfluenceProvided,
            &state.agent_id,
            EventData::InfluenceProvided {
                to: state.agent_id.clone(),
                task_id: task_id.to_string(),
            },
        );
        state.influence_provided.push(task_id.to_string());
        state.has_received_influence = true;
        let requester_id = state.agent_id.clone();
        self.remove_matching(&requester_id, task_id);
        log.append(
            EventType::InfluenceFulfilled,
            &state.agent_id,
            EventData::InfluenceFulfilled {
                from: state.agent_id.clone(),
                task_id: task_id.to_string(),
            },
        );
    }

    fn remove_matching(&mut self, requester_id: &str, task_id: &str) {
        self.requests
            .retain(|r| !(r.requester_id == requester_id && r.task_id == task_id));
    }
}
