//! Tiering: discrete privilege levels derived from reputation

use praetor_audit::EventLog;
use praetor_types::{AgentState, EventData, EventType};

use crate::reputation::round4;

/// Ascending (tier, minimum reputation) table. Tier 0 is the floor.
pub const TIER_THRESHOLDS: [(u8, f64); 3] = [(1, 0.55), (2, 0.70), (3, 0.85)];

/// Recompute the highest tier the current reputation clears and log an
/// upgrade or downgrade if it moved. Equal means no event and no mutation.
/// Must run after every reputation change that could cross a boundary.
pub fn evaluate(state: &mut AgentState, log: &mut EventLog) {
    let old_tier = state.tier;
    let mut new_tier = 0;
    for (tier, threshold) in TIER_THRESHOLDS {
        if state.reputation >= threshold {
            new_tier = tier;
        }
    }

    if new_tier == old_tier {
        return;
    }

    state.tier = new_tier;
    let event_type = if new_tier > old_tier {
        EventType::TierUpgraded
    } else {
        EventType::TierDowngraded
    };
    tracing::info!(agent_id = %state.agent_id, old_tier, new_tier, "tier changed");
    log.append(
        event_type,
        &state.agent_id,
        EventData::TierChanged {
            old_tier,
            new_tier,
            reputation: round4(state.reputation),
        },
    );
}
