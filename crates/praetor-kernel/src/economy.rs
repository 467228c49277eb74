//! Budget economy: allocation, debit, and the defund sanction
//!
//! Insufficient funds is punished disproportionately: the failed debit
//! zeroes the whole balance, making budget exhaustion a hard economic stop
//! rather than a soft limit.

use praetor_audit::EventLog;
use praetor_types::{AgentState, EventData, EventType};

/// Unconditionally increase the agent's balance.
pub fn allocate(state: &mut AgentState, amount: f64, log: &mut EventLog) {
    state.budget += amount;
    log.append(
        EventType::BudgetAllocated,
        &state.agent_id,
        EventData::BudgetMovement {
            amount,
            new_balance: state.budget,
        },
    );
}

/// Debit one step's cost. Returns `false` and defunds the agent entirely
/// if the balance cannot cover the amount; the balance is never driven
/// below zero by a partial debit.
pub fn debit(state: &mut AgentState, amount: f64, log: &mut EventLog) -> bool {
    if state.budget < amount {
        log.append(
            EventType::BudgetExceeded,
            &state.agent_id,
            EventData::BudgetExceeded {
                attempted: amount,
                balance: state.budget,
            },
        );
        defund(state, log);
        return false;
    }
    state.budget -= amount;
    log.append(
        EventType::BudgetDebited,
        &state.agent_id,
        EventData::BudgetMovement {
            amount,
            new_balance: state.budget,
        },
    );
    true
}

fn defund(state: &mut AgentState, log: &mut EventLog) {
    tracing::warn!(agent_id = %state.agent_id, "agent defunded");
    state.budget = 0.0;
    log.append(
        EventType::BudgetDefunded,
        &state.agent_id,
        EventData::BudgetDefunded { new_balance: 0.0 },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_increases_balance() {
        let mut state = AgentState::new("agent-1");
        let mut log = EventLog::new();
        allocate(&mut state, 100.0, &mut log);
        assert_eq!(state.budget, 100.0);
        assert_eq!(log.events_of_type(EventType::BudgetAllocated).count(), 1);
    }

    #[test]
    fn test_debit_success() {
        let mut state = AgentState::new("agent-1");
        let mut log = EventLog::new();
        allocate(&mut state, 100.0, &mut log);
        assert!(debit(&mut state, 5.0, &mut log));
        assert_eq!(state.budget, 95.0);
    }

    #[test]
    fn test_insufficient_funds_defunds() {
        let mut state = AgentState::new("agent-1");
        let mut log = EventLog::new();
        allocate(&mut state, 3.0, &mut log);
        assert!(!debit(&mut state, 5.0, &mut log));
        assert_eq!(state.budget, 0.0);
        assert_eq!(log.events_of_type(EventType::BudgetExceeded).count(), 1);
        assert_eq!(log.events_of_type(EventType::BudgetDefunded).count(), 1);
    }

    #[test]
    fn test_balance_never_negative() {
        let mut state = AgentState::new("agent-1");
        let mut log = EventLog::new();
        allocate(&mut state, 100.0, &mut log);
        for _ in 0..20 {
            assert!(debit(&mut state, 5.0, &mut log));
            assert!(state.budget >= 0.0);
        }
        assert_eq!(state.budget, 0.0);
        assert!(!debit(&mut state, 5.0, &mut log));
        assert_eq!(state.budget, 0.0);
    }
}
