use crate::model::PairId;
use pairsplit_domain::{AggregationError, ExpenseId, MemberId, Money, RosterError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("pair {0} has no registered members")]
    UnknownPair(PairId),
    #[error("member {member} is not registered to pair {pair_id}")]
    UnknownMember { pair_id: PairId, member: MemberId },
    #[error("member {0} is already registered")]
    MemberAlreadyRegistered(MemberId),
    #[error("expense {0} does not exist")]
    UnknownExpense(ExpenseId),
    #[error("expense {0} already belongs to another pair")]
    DuplicateExpense(ExpenseId),
    #[error("expense amount must not be negative (got {0})")]
    InvalidAmount(Money),
    #[error("stored roster is inconsistent: {0}")]
    Roster(#[from] RosterError),
    #[error("store request failed: {0}")]
    Request(String),
}

/// Who has to act on a failure; decides the log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    UserInput,
    Misconfiguration,
    InternalBug,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SettlementError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SettlementError::Aggregation(
                AggregationError::OrphanedPayer { .. }
                | AggregationError::NegativeAmount { .. }
                | AggregationError::AmountOverflow,
            ) => FailureKind::UserInput,
            SettlementError::Store(
                StoreError::UnknownPair(_)
                | StoreError::UnknownMember { .. }
                | StoreError::MemberAlreadyRegistered(_)
                | StoreError::UnknownExpense(_)
                | StoreError::DuplicateExpense(_)
                | StoreError::InvalidAmount(_),
            ) => FailureKind::UserInput,
            SettlementError::Store(StoreError::Request(_)) => FailureKind::Misconfiguration,
            SettlementError::Store(StoreError::Roster(_)) => FailureKind::InternalBug,
        }
    }

    /// Emit the error at the level its [`FailureKind`] calls for.
    pub fn log(&self) {
        match self.kind() {
            FailureKind::InternalBug => {
                tracing::error!(error = ?self, "Settlement failed due to internal bug");
            }
            FailureKind::Misconfiguration => {
                tracing::warn!(error = ?self, "Settlement failed due to misconfiguration");
            }
            FailureKind::UserInput => {
                tracing::info!(error = ?self, "Settlement failed due to user input");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::orphaned_payer(
        SettlementError::Aggregation(AggregationError::OrphanedPayer {
            expense: ExpenseId::new("e1"),
            payer: MemberId::new("x"),
        }),
        FailureKind::UserInput
    )]
    #[case::store_unreachable(
        SettlementError::Store(StoreError::Request("timeout".to_string())),
        FailureKind::Misconfiguration
    )]
    #[case::corrupted_roster(
        SettlementError::Store(StoreError::Roster(RosterError::DuplicateMember(MemberId::new("a")))),
        FailureKind::InternalBug
    )]
    fn kind_classifies_failures(#[case] error: SettlementError, #[case] expected: FailureKind) {
        assert_eq!(error.kind(), expected);
    }
}
