//! Praetor Audit - Immutable event log
//!
//! All consequential kernel actions produce events. The log is append-only
//! and strictly ordered: sequence numbers start at 0 and are gap-free, and
//! every timestamp is the fixed deterministic string so two runs with
//! identical inputs serialize to byte-identical JSON.

use praetor_types::{Event, EventData, EventType};
use thiserror::Error;

/// Fixed deterministic timestamp for reproducibility.
pub const FIXED_TIMESTAMP: &str = "2025-01-01T00:00:00Z";

/// Errors from log serialization.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("event log serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The append-only event log.
///
/// Appends never fail; events are never mutated or removed. The invariant
/// `events[i].sequence == i` holds for every index.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event, assigning the next sequence number, and return a
    /// reference to the stored entry.
    pub fn append(
        &mut self,
        event_type: EventType,
        agent_id: impl Into<String>,
        data: EventData,
    ) -> &Event {
        self.append_signed(event_type, agent_id, data, String::new())
    }

    /// Append an event carrying the hex signature of the intent that
    /// produced it (the record a verification sweep replays).
    pub fn append_signed(
        &mut self,
        event_type: EventType,
        agent_id: impl Into<String>,
        data: EventData,
        signature: String,
    ) -> &Event {
        let event = Event {
            sequence: self.events.len() as u64,
            timestamp: FIXED_TIMESTAMP.to_string(),
            event_type,
            agent_id: agent_id.into(),
            data,
            signature,
        };
        tracing::trace!(sequence = event.sequence, event_type = %event.event_type, agent_id = %event.agent_id, "event appended");
        self.events.push(event);
        self.events.last().expect("just pushed")
    }

    /// The full ordered event list.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_for_agent<'a>(&'a self, agent_id: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events.iter().filter(move |e| e.agent_id == agent_id)
    }

    pub fn events_of_type(&self, event_type: EventType) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(move |e| e.event_type == event_type)
    }

    /// Serialize the whole log as an ordered JSON array, preserving both
    /// array order and per-event field order.
    pub fn to_json(&self) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }
}
