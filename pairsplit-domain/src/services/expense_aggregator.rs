//! Net paid totals, the per-member average, and signed balances.

use crate::{
    model::{Expense, ExpenseId, MemberBalances, MemberId, Money, Roster},
    services::RoundingMode,
};
use fxhash::FxHashSet;
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// What to do with an expense whose payer is not in the roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Fail the whole computation.
    #[default]
    Reject,
    /// Leave the expense out of the totals and report it as skipped.
    Ignore,
    /// Give the unknown payer a bucket of their own, counted in the headcount.
    IncludeAsGuest,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregationOptions {
    pub rounding_mode: RoundingMode,
    pub orphan_policy: OrphanPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("expense {expense} was paid by {payer}, who is not a member of the pair")]
    OrphanedPayer { expense: ExpenseId, payer: MemberId },
    #[error("expense {expense} has a negative amount ({amount})")]
    NegativeAmount { expense: ExpenseId, amount: Money },
    #[error("expense totals do not fit in the currency range")]
    AmountOverflow,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Roster members first in roster order, then any guest payers.
    pub balances: MemberBalances,
    /// Expenses left out under [`OrphanPolicy::Ignore`].
    pub skipped_expenses: Vec<ExpenseId>,
    /// Payers added under [`OrphanPolicy::IncludeAsGuest`].
    pub guests: Vec<MemberId>,
}

impl Aggregation {
    /// Sum of the rounded balances. Zero before rounding; at most `count - 1` units off after.
    pub fn rounding_drift(&self) -> Money {
        self.balances.values().sum()
    }
}

/// Balance calculation service
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpenseAggregator {
    options: AggregationOptions,
}

impl ExpenseAggregator {
    pub fn new(options: AggregationOptions) -> Self {
        Self { options }
    }

    /// Computes each member's signed deviation from the average contribution.
    ///
    /// Every roster member gets a total, including members who paid nothing, so
    /// they take part in the average and can end up owed or owing money.
    /// Settled expenses never count, whether or not the caller filtered them.
    ///
    /// An empty roster yields an empty mapping.
    pub fn aggregate(
        &self,
        roster: &Roster,
        expenses: &[Expense],
    ) -> Result<Aggregation, AggregationError> {
        if roster.is_empty() {
            tracing::debug!(
                expense_count = expenses.len(),
                "Empty roster; no settlement possible"
            );
            return Ok(Aggregation::default());
        }

        let mut totals: IndexMap<MemberId, Money> =
            roster.ids().map(|id| (id.clone(), Money::ZERO)).collect();
        let mut skipped_expenses = Vec::new();
        let mut guests = Vec::new();
        let mut reported_orphans: FxHashSet<&MemberId> = FxHashSet::default();

        for expense in expenses.iter().filter(|expense| !expense.settled) {
            if expense.amount.is_negative() {
                return Err(AggregationError::NegativeAmount {
                    expense: expense.id.clone(),
                    amount: expense.amount,
                });
            }

            if !roster.contains(&expense.payer) {
                match self.options.orphan_policy {
                    OrphanPolicy::Reject => {
                        tracing::warn!(
                            expense_id = %expense.id,
                            payer = %expense.payer,
                            "Rejecting expense paid by a member outside the roster"
                        );
                        return Err(AggregationError::OrphanedPayer {
                            expense: expense.id.clone(),
                            payer: expense.payer.clone(),
                        });
                    }
                    OrphanPolicy::Ignore => {
                        tracing::warn!(
                            expense_id = %expense.id,
                            payer = %expense.payer,
                            amount = expense.amount.amount(),
                            "Skipping expense paid by a member outside the roster"
                        );
                        skipped_expenses.push(expense.id.clone());
                        continue;
                    }
                    OrphanPolicy::IncludeAsGuest => {
                        if reported_orphans.insert(&expense.payer) {
                            tracing::warn!(
                                payer = %expense.payer,
                                "Including payer outside the roster as a guest"
                            );
                            guests.push(expense.payer.clone());
                        }
                    }
                }
            }

            let total = totals.entry(expense.payer.clone()).or_insert(Money::ZERO);
            *total = total
                .checked_add(expense.amount)
                .ok_or(AggregationError::AmountOverflow)?;
        }

        let grand_total = totals
            .values()
            .try_fold(Money::ZERO, |acc, total| acc.checked_add(*total))
            .ok_or(AggregationError::AmountOverflow)?;
        let headcount = Decimal::from(totals.len());
        let average = Decimal::from(grand_total.amount())
            .checked_div(headcount)
            .ok_or(AggregationError::AmountOverflow)?;

        let balances = totals
            .into_iter()
            .map(|(id, total)| {
                let deviation = Decimal::from(total.amount()) - average;
                self.options
                    .rounding_mode
                    .round_to_unit(deviation)
                    .map(|balance| (id, Money::from_i64(balance)))
                    .ok_or(AggregationError::AmountOverflow)
            })
            .collect::<Result<MemberBalances, AggregationError>>()?;

        let aggregation = Aggregation {
            balances,
            skipped_expenses,
            guests,
        };

        tracing::debug!(
            member_count = aggregation.balances.len(),
            expense_count = expenses.len(),
            total = grand_total.amount(),
            average = %average,
            rounding_mode = ?self.options.rounding_mode,
            drift = aggregation.rounding_drift().amount(),
            "Expense aggregation finished"
        );

        Ok(aggregation)
    }
}
