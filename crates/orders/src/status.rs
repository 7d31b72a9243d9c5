use serde::{Deserialize, Serialize};

use shoplite_core::{DomainError, DomainResult};

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// Stock-ledger side effect implied by a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEffect {
    /// Decrement stock and log decrease movements for the order's lines.
    Reserve,
    /// Increment stock and log increase movements for the order's lines.
    Release,
    /// No ledger effect.
    None,
}

impl OrderStatus {
    /// Whether no further transitions are defined out of this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Decide the ledger effect of moving from `self` to `to`.
    ///
    /// Only two transitions carry an effect: `Pending -> Processing`
    /// reserves (a second time — creation already reserved once, preserved
    /// behavior, see DESIGN notes) and `Processing -> Cancelled` releases.
    /// Everything else is effect-free. Transitions out of a terminal status
    /// and same-status transitions are rejected.
    pub fn transition(self, to: OrderStatus) -> DomainResult<LedgerEffect> {
        if self.is_terminal() {
            return Err(DomainError::invariant(format!(
                "no transitions defined out of terminal status {self:?}"
            )));
        }
        if self == to {
            return Err(DomainError::validation(format!(
                "order is already {to:?}"
            )));
        }
        Ok(match (self, to) {
            (OrderStatus::Pending, OrderStatus::Processing) => LedgerEffect::Reserve,
            (OrderStatus::Processing, OrderStatus::Cancelled) => LedgerEffect::Release,
            _ => LedgerEffect::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_to_processing_reserves() {
        assert_eq!(
            OrderStatus::Pending.transition(OrderStatus::Processing).unwrap(),
            LedgerEffect::Reserve
        );
    }

    #[test]
    fn processing_to_cancelled_releases() {
        assert_eq!(
            OrderStatus::Processing.transition(OrderStatus::Cancelled).unwrap(),
            LedgerEffect::Release
        );
    }

    #[test]
    fn other_transitions_have_no_effect() {
        assert_eq!(
            OrderStatus::Pending.transition(OrderStatus::Cancelled).unwrap(),
            LedgerEffect::None
        );
        assert_eq!(
            OrderStatus::Pending.transition(OrderStatus::Completed).unwrap(),
            LedgerEffect::None
        );
        assert_eq!(
            OrderStatus::Processing.transition(OrderStatus::Completed).unwrap(),
            LedgerEffect::None
        );
    }

    #[test]
    fn terminal_statuses_reject_transitions() {
        for from in [OrderStatus::Completed, OrderStatus::Cancelled] {
            let err = from.transition(OrderStatus::Pending).unwrap_err();
            assert!(matches!(err, DomainError::InvariantViolation(_)));
        }
    }

    #[test]
    fn same_status_is_rejected() {
        let err = OrderStatus::Pending.transition(OrderStatus::Pending).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
