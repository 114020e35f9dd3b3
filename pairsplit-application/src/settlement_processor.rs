use crate::{
    error::SettlementError,
    model::{MemberBalance, PairId, PairSnapshot},
    ports::ExpenseStore,
};
use pairsplit_domain::{
    AggregationOptions, Expense, ExpenseAggregator, ExpenseId, SettlementPlanner, Transfer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementResult {
    pub pair_id: PairId,
    pub revision: u64,
    /// Roster order, guests last.
    pub balances: Vec<MemberBalance>,
    pub transfers: Vec<Transfer>,
    pub skipped_expenses: Vec<ExpenseId>,
}

impl SettlementResult {
    pub fn is_settled_up(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// Runs the aggregator and the planner over one snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementProcessor {
    aggregator: ExpenseAggregator,
    planner: SettlementPlanner,
}

impl SettlementProcessor {
    pub fn new(options: AggregationOptions) -> Self {
        Self {
            aggregator: ExpenseAggregator::new(options),
            planner: SettlementPlanner,
        }
    }

    pub fn settle(&self, snapshot: &PairSnapshot) -> Result<SettlementResult, SettlementError> {
        let expenses: Vec<Expense> = snapshot
            .expenses
            .iter()
            .map(|record| record.to_expense())
            .collect();

        let aggregation = self.aggregator.aggregate(&snapshot.roster, &expenses)?;
        let transfers = self.planner.plan(&aggregation.balances);

        tracing::debug!(
            pair_id = %snapshot.pair_id,
            revision = snapshot.revision,
            member_count = snapshot.roster.len(),
            expense_count = expenses.len(),
            transfer_count = transfers.len(),
            skipped_count = aggregation.skipped_expenses.len(),
            "Settlement computed"
        );

        let balances = aggregation
            .balances
            .into_iter()
            .map(|(id, balance)| MemberBalance { id, balance })
            .collect();

        Ok(SettlementResult {
            pair_id: snapshot.pair_id.clone(),
            revision: snapshot.revision,
            balances,
            transfers,
            skipped_expenses: aggregation.skipped_expenses,
        })
    }

    /// One-shot read from the store followed by [`Self::settle`].
    pub async fn settle_pair<S>(
        &self,
        store: &S,
        pair_id: &PairId,
    ) -> Result<SettlementResult, SettlementError>
    where
        S: ExpenseStore,
    {
        let snapshot = store.snapshot(pair_id).await?;
        self.settle(&snapshot)
    }
}
